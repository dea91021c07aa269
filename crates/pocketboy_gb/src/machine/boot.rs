/// Size of the boot overlay image.
pub const BOOT_IMAGE_SIZE: usize = 0x100;

/// Boot image overlay over 0x0000–0x00FF.
///
/// While enabled, reads in the lowest 256 bytes come from the overlay
/// instead of cartridge ROM. A nonzero write to FF50 disables it; a bus
/// reset re-arms it when an image is installed. Fetching the image (the
/// original pulls it over the network) is the host's job; the core only
/// accepts the bytes.
#[derive(Default)]
pub(crate) struct BootOverlay {
    image: Option<[u8; BOOT_IMAGE_SIZE]>,
    enabled: bool,
}

impl BootOverlay {
    /// Install a 256-byte boot image and arm the overlay.
    pub(crate) fn install(&mut self, image: [u8; BOOT_IMAGE_SIZE]) {
        self.image = Some(image);
        self.enabled = true;
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.enabled && self.image.is_some()
    }

    /// Read a byte of the overlay. Only meaningful while `is_active`.
    #[inline]
    pub(crate) fn read(&self, offset: u16) -> u8 {
        debug_assert!(self.is_active());
        self.image.as_ref().map_or(0xFF, |image| image[offset as usize])
    }

    /// Permanently unmap the overlay for this session.
    pub(crate) fn disable(&mut self) {
        if self.enabled {
            log::debug!("boot overlay disabled");
        }
        self.enabled = false;
    }

    /// Re-arm the overlay for a fresh session if an image is present.
    pub(crate) fn reset(&mut self) {
        self.enabled = self.image.is_some();
    }
}
