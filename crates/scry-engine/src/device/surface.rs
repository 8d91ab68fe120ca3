//! Surface configuration helpers, kept free of `Gpu` so they can be tested
//! against hand-built capabilities.

use super::SurfaceErrorAction;

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

pub(super) fn choose_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = SRGB_FORMATS.iter().find(|f| caps.formats.contains(f)) {
            return Some(*f);
        }
    }
    caps.formats.first().copied()
}

pub(super) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Falls back to FIFO, which every surface supports.
pub(super) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Maps an acquire error to an action. `reconfigure` runs for lost or
/// outdated surfaces.
pub(super) fn classify_error(
    err: &wgpu::SurfaceError,
    reconfigure: impl FnOnce(),
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            reconfigure();
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn prefers_srgb_when_offered() {
        let c = caps(vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]);
        assert_eq!(choose_format(&c, true), Some(wgpu::TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_none() {
        assert_eq!(choose_format(&caps(vec![]), true), None);
    }

    #[test]
    fn unsupported_modes_fall_back() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8Unorm]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_present_mode(&c, wgpu::PresentMode::Immediate),
            wgpu::PresentMode::Fifo
        );
        assert_eq!(
            choose_present_mode(&c, wgpu::PresentMode::Mailbox),
            wgpu::PresentMode::Mailbox
        );
    }

    #[test]
    fn lost_surface_is_reconfigured() {
        let mut hits = 0;
        let action = classify_error(&wgpu::SurfaceError::Lost, || hits += 1);
        assert_eq!(action, SurfaceErrorAction::Reconfigured);
        assert_eq!(hits, 1);

        let action = classify_error(&wgpu::SurfaceError::Timeout, || hits += 1);
        assert_eq!(action, SurfaceErrorAction::SkipFrame);
        assert_eq!(hits, 1);

        assert_eq!(
            classify_error(&wgpu::SurfaceError::OutOfMemory, || {}),
            SurfaceErrorAction::Fatal
        );
    }
}
