//! Swapchain configuration selection
//!
//! Pure helpers that pick a surface format, present mode, extent and image
//! count from the surface's reported capabilities. Kept free of device state
//! so the selection rules can be tested directly.

use ash::vk;

/// Fallback extent when the surface does not dictate one.
pub(crate) const DEFAULT_EXTENT: vk::Extent2D = vk::Extent2D {
    width: 1600,
    height: 900,
};

/// Pick the swapchain surface format.
///
/// With `prefer_hdr`, the first advertised format carrying an HDR color
/// space wins. Otherwise (or when the surface offers none) prefer
/// B8G8R8A8_SRGB with the sRGB color space, falling back to the first
/// advertised format. `formats` must be non-empty, which Vulkan guarantees
/// for any surface.
pub(crate) fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
    prefer_hdr: bool,
) -> vk::SurfaceFormatKHR {
    if prefer_hdr {
        if let Some(format) = formats.iter().find(|f| {
            f.color_space == vk::ColorSpaceKHR::HDR10_ST2084_EXT
                || f.color_space == vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT
        }) {
            return *format;
        }
    }

    formats
        .iter()
        .find(|f| {
            f.format == vk::Format::B8G8R8A8_SRGB
                && f.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .copied()
        .unwrap_or(formats[0])
}

/// Pick the presentation mode.
///
/// MAILBOX is only considered when `prefer_mailbox` is set; FIFO is the
/// default since every conformant driver provides it.
pub(crate) fn choose_present_mode(
    modes: &[vk::PresentModeKHR],
    prefer_mailbox: bool,
) -> vk::PresentModeKHR {
    if prefer_mailbox && modes.contains(&vk::PresentModeKHR::MAILBOX) {
        return vk::PresentModeKHR::MAILBOX;
    }
    if modes.contains(&vk::PresentModeKHR::FIFO) {
        return vk::PresentModeKHR::FIFO;
    }
    modes.first().copied().unwrap_or(vk::PresentModeKHR::FIFO)
}

/// Resolve the swapchain extent.
///
/// A definite `current_extent` is authoritative; otherwise the default
/// window size is clamped into the supported range.
pub(crate) fn choose_extent(caps: &vk::SurfaceCapabilitiesKHR) -> vk::Extent2D {
    if caps.current_extent.width != u32::MAX {
        return caps.current_extent;
    }

    vk::Extent2D {
        width: DEFAULT_EXTENT
            .width
            .clamp(caps.min_image_extent.width, caps.max_image_extent.width),
        height: DEFAULT_EXTENT
            .height
            .clamp(caps.min_image_extent.height, caps.max_image_extent.height),
    }
}

/// Resolve the number of swapchain images to request.
///
/// One more than the minimum avoids stalling on the driver; triple buffering
/// raises the request to at least three. A `max_image_count` of zero means
/// the surface imposes no upper bound.
pub(crate) fn choose_image_count(
    caps: &vk::SurfaceCapabilitiesKHR,
    triple_buffering: bool,
) -> u32 {
    let mut count = caps.min_image_count + 1;
    if triple_buffering {
        count = count.max(3);
    }
    if caps.max_image_count > 0 {
        count = count.min(caps.max_image_count);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(min_count: u32, max_count: u32) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: min_count,
            max_image_count: max_count,
            current_extent: vk::Extent2D {
                width: u32::MAX,
                height: u32::MAX,
            },
            min_image_extent: vk::Extent2D {
                width: 1,
                height: 1,
            },
            max_image_extent: vk::Extent2D {
                width: 4096,
                height: 4096,
            },
            ..Default::default()
        }
    }

    fn fmt(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR {
            format,
            color_space,
        }
    }

    #[test]
    fn srgb_format_preferred() {
        let formats = [
            fmt(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];
        let chosen = choose_surface_format(&formats, false);
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_SRGB);
        assert_eq!(chosen.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn format_falls_back_to_first() {
        let formats = [fmt(
            vk::Format::R8G8B8A8_UNORM,
            vk::ColorSpaceKHR::SRGB_NONLINEAR,
        )];
        assert_eq!(
            choose_surface_format(&formats, false).format,
            vk::Format::R8G8B8A8_UNORM
        );
    }

    #[test]
    fn hdr_format_picked_only_when_requested() {
        let formats = [
            fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            fmt(
                vk::Format::A2B10G10R10_UNORM_PACK32,
                vk::ColorSpaceKHR::HDR10_ST2084_EXT,
            ),
        ];
        assert_eq!(
            choose_surface_format(&formats, true).color_space,
            vk::ColorSpaceKHR::HDR10_ST2084_EXT
        );
        assert_eq!(
            choose_surface_format(&formats, false).color_space,
            vk::ColorSpaceKHR::SRGB_NONLINEAR
        );
    }

    #[test]
    fn extended_srgb_counts_as_hdr() {
        let formats = [
            fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            fmt(
                vk::Format::R16G16B16A16_SFLOAT,
                vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
            ),
        ];
        assert_eq!(
            choose_surface_format(&formats, true).format,
            vk::Format::R16G16B16A16_SFLOAT
        );
    }

    #[test]
    fn hdr_request_without_hdr_surface_uses_srgb() {
        let formats = [
            fmt(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];
        assert_eq!(
            choose_surface_format(&formats, true).format,
            vk::Format::B8G8R8A8_SRGB
        );
    }

    #[test]
    fn fifo_is_default_present_mode() {
        let modes = [
            vk::PresentModeKHR::IMMEDIATE,
            vk::PresentModeKHR::MAILBOX,
            vk::PresentModeKHR::FIFO,
        ];
        assert_eq!(choose_present_mode(&modes, false), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn mailbox_only_when_requested() {
        let modes = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX];
        assert_eq!(
            choose_present_mode(&modes, true),
            vk::PresentModeKHR::MAILBOX
        );
        assert_eq!(choose_present_mode(&modes, false), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn mailbox_request_without_support_falls_back_to_fifo() {
        let modes = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(choose_present_mode(&modes, true), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn first_mode_when_fifo_missing() {
        let modes = [vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(
            choose_present_mode(&modes, false),
            vk::PresentModeKHR::IMMEDIATE
        );
        assert_eq!(choose_present_mode(&[], false), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn definite_extent_is_authoritative() {
        let caps = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: 1024,
                height: 768,
            },
            ..caps(2, 0)
        };
        let extent = choose_extent(&caps);
        assert_eq!((extent.width, extent.height), (1024, 768));
    }

    #[test]
    fn default_extent_clamped_into_supported_range() {
        let unbounded = caps(2, 0);
        let extent = choose_extent(&unbounded);
        assert_eq!((extent.width, extent.height), (1600, 900));

        let small = vk::SurfaceCapabilitiesKHR {
            max_image_extent: vk::Extent2D {
                width: 800,
                height: 600,
            },
            ..caps(2, 0)
        };
        let extent = choose_extent(&small);
        assert_eq!((extent.width, extent.height), (800, 600));

        let large = vk::SurfaceCapabilitiesKHR {
            min_image_extent: vk::Extent2D {
                width: 2000,
                height: 1000,
            },
            ..caps(2, 0)
        };
        let extent = choose_extent(&large);
        assert_eq!((extent.width, extent.height), (2000, 1000));
    }

    #[test]
    fn image_count_is_min_plus_one() {
        assert_eq!(choose_image_count(&caps(2, 0), false), 3);
    }

    #[test]
    fn image_count_clamped_to_max() {
        assert_eq!(choose_image_count(&caps(3, 3), false), 3);
    }

    #[test]
    fn triple_buffering_requests_at_least_three() {
        assert_eq!(choose_image_count(&caps(1, 0), true), 3);
        assert_eq!(choose_image_count(&caps(1, 2), true), 2);
        assert_eq!(choose_image_count(&caps(3, 0), true), 4);
    }

    #[test]
    fn baseline_surface_selection() {
        // Classic desktop surface: two images minimum, no upper bound, one
        // sRGB format, FIFO only.
        let caps = caps(2, 0);
        let formats = [fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR)];
        let modes = [vk::PresentModeKHR::FIFO];

        assert_eq!(choose_image_count(&caps, false), 3);
        let format = choose_surface_format(&formats, false);
        assert_eq!(format.format, vk::Format::B8G8R8A8_SRGB);
        assert_eq!(format.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
        assert_eq!(choose_present_mode(&modes, false), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn selection_is_deterministic() {
        let caps = caps(2, 4);
        let formats = [
            fmt(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            fmt(
                vk::Format::A2B10G10R10_UNORM_PACK32,
                vk::ColorSpaceKHR::HDR10_ST2084_EXT,
            ),
        ];
        let modes = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX];

        for _ in 0..3 {
            let fa = choose_surface_format(&formats, true);
            let fb = choose_surface_format(&formats, true);
            assert_eq!(fa.format, fb.format);
            assert_eq!(fa.color_space, fb.color_space);
            assert_eq!(
                choose_present_mode(&modes, true),
                choose_present_mode(&modes, true)
            );
            let a = choose_extent(&caps);
            let b = choose_extent(&caps);
            assert_eq!((a.width, a.height), (b.width, b.height));
            assert_eq!(
                choose_image_count(&caps, true),
                choose_image_count(&caps, true)
            );
        }
    }
}
