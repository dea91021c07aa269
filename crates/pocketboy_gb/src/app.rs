use pocketboy_common::app::App;
use pocketboy_common::key::Key;

use crate::machine::Button;
use crate::{GameBoy, SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Host-facing application wrapper for the Game Boy machine.
///
/// Implements the shared `App` trait so a frontend can drive the
/// emulator: one `update` call per display frame runs a frame's worth of
/// cycles and copies the framebuffer out.
#[derive(Default)]
pub struct GameBoyApp {
    pub gb: GameBoy,
    should_exit: bool,
    frame_counter: u64,
}

impl App for GameBoyApp {
    fn init(&mut self) {
        pocketboy_common::init_logger();
        log::info!("Game Boy init");
    }

    fn update(&mut self, screen: &mut [u8]) {
        self.gb.step_frame();
        self.gb.copy_frame_into(screen);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        if self.frame_counter % 60 == 0 {
            let regs = &self.gb.cpu.regs;
            log::debug!(
                "frame={} status={:?} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} \
                 de=0x{:04X} hl=0x{:04X}",
                self.frame_counter,
                self.gb.status(),
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
            );
        }
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        let button = match key {
            Key::Right => Button::Right,
            Key::Left => Button::Left,
            Key::Up => Button::Up,
            Key::Down => Button::Down,
            Key::Z => Button::A,
            Key::X => Button::B,
            Key::A => Button::Select,
            Key::S => Button::Start,
            Key::Escape => {
                if is_down {
                    self.should_exit = true;
                }
                return;
            }
            _ => return,
        };

        if is_down {
            self.gb.press_key(button);
        } else {
            self.gb.release_key(button);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit");
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "PocketBoy".to_string()
    }
}
