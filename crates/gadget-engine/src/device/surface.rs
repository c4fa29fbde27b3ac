//! Surface configuration choices, kept free of live GPU objects.

use super::SurfaceErrorAction;

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Composite modes that let a transparent window show the desktop.
const BLENDING_ALPHA_MODES: [wgpu::CompositeAlphaMode; 2] = [
    wgpu::CompositeAlphaMode::PreMultiplied,
    wgpu::CompositeAlphaMode::PostMultiplied,
];

pub(crate) fn choose_surface_format(
    supported: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = if prefer_srgb {
        SRGB_FORMATS.iter().copied().find(|f| supported.contains(f))
    } else {
        supported.iter().copied().find(|f| !f.is_srgb())
    };
    preferred.or_else(|| supported.first().copied())
}

/// `requested` when supported. A request for a blending mode falls back to
/// the other blending mode before settling for whatever comes first.
pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    if let Some(mode) = requested {
        if supported.contains(&mode) {
            return mode;
        }
        if BLENDING_ALPHA_MODES.contains(&mode) {
            if let Some(alt) = BLENDING_ALPHA_MODES.iter().find(|m| supported.contains(m)) {
                return *alt;
            }
            log::debug!("surface cannot blend with the desktop; window will be opaque");
        }
    }
    supported.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode as Alpha;
    use wgpu::TextureFormat as Fmt;

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn linear_request_skips_leading_srgb_formats() {
        let formats = [Fmt::Bgra8UnormSrgb, Fmt::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
        assert_eq!(choose_surface_format(&[Fmt::Bgra8UnormSrgb], false), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn premultiplied_falls_back_to_postmultiplied() {
        let modes = [Alpha::Opaque, Alpha::PostMultiplied];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PreMultiplied)), Alpha::PostMultiplied);
    }

    #[test]
    fn unsupported_request_uses_first_mode() {
        assert_eq!(choose_alpha_mode(&[Alpha::Opaque], Some(Alpha::PreMultiplied)), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[Alpha::Opaque, Alpha::Inherit], None), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }

    #[test]
    fn surface_errors_are_classified() {
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigure);
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
    }
}
