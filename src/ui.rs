extern crate sdl2;

use log::trace;

use sdl2::keyboard::Keycode;
use sdl2::{pixels::Color, rect::Rect};

use chip8vm::arch;
use chip8vm::framebuffer::Frame;

const BORDER_SIZE: u32 = 1;

const BACKGROUND_COLOR: Color = Color::BLUE;
const PIXEL_COLOR: Color = Color::RGB(200, 200, 200);

const BEEP_HZ: f32 = 440.0;

pub enum Event {
    KeyPress(u8),
    KeyUnpress(u8),
    Faster,
    Slower,
    Reset,
    Quit,
}

/// COSMAC VIP hex keypad on the left of a QWERTY keyboard.
///
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  ->  Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

pub struct EventIterator<'a> {
    event_pump: &'a mut sdl2::EventPump,
}

impl<'a> Iterator for EventIterator<'a> {
    type Item = Event;

    fn next(self: &mut EventIterator<'a>) -> Option<Self::Item> {
        // Skip events we have no use for instead of ending the iteration.
        while let Some(e) = self.event_pump.poll_event() {
            if let Some(event) = Events::match_event(e) {
                return Some(event);
            }
        }
        None
    }
}

pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    pixel_size: u32,
}

impl Display {
    pub fn new(canvas: sdl2::render::WindowCanvas, pixel_size: u32) -> Display {
        Display {
            canvas,
            pixel_size,
        }
    }

    pub fn present_frame(&mut self, frame: &Frame) -> Result<(), String> {
        let inner = self.pixel_size.saturating_sub(2 * BORDER_SIZE).max(1);

        self.canvas.set_draw_color(BACKGROUND_COLOR);
        self.canvas.clear();
        self.canvas.set_draw_color(PIXEL_COLOR);
        let mut pixels: Vec<Rect> = Vec::new();
        for (i, row) in frame.iter().enumerate() {
            for j in 0..arch::DISPLAY_WIDTH {
                if row & (1u64 << (arch::DISPLAY_WIDTH - 1 - j)) != 0 {
                    let x: i32 = (self.pixel_size * j + BORDER_SIZE) as i32;
                    let y: i32 = (self.pixel_size * (i as u32) + BORDER_SIZE) as i32;

                    pixels.push(Rect::new(x, y, inner, inner));
                }
            }
        }
        if !pixels.is_empty() {
            self.canvas.fill_rects(&pixels)?;
        }
        self.canvas.present();
        Ok(())
    }
}

pub struct Events {
    event_pump: sdl2::EventPump,
}

impl Events {
    pub fn new(event_pump: sdl2::EventPump) -> Events {
        Events {
            event_pump,
        }
    }

    pub fn poll_iter(&mut self) -> EventIterator {
        EventIterator {
            event_pump: &mut self.event_pump,
        }
    }

    fn match_event(sdl2_event: sdl2::event::Event) -> Option<Event> {
        use sdl2::event::Event as Sdl;

        match sdl2_event {
            Sdl::Quit {..} |
                Sdl::KeyDown { keycode: Some(Keycode::Space), repeat: false, .. } |
                Sdl::KeyDown { keycode: Some(Keycode::Escape), repeat: false, .. } => Some(Event::Quit),

            Sdl::KeyDown { keycode: Some(Keycode::Up), .. } => Some(Event::Faster),
            Sdl::KeyDown { keycode: Some(Keycode::Down), .. } => Some(Event::Slower),
            Sdl::KeyDown { keycode: Some(Keycode::Backspace), repeat: false, .. } => Some(Event::Reset),

            Sdl::KeyDown { keycode: Some(key), repeat: false, .. } => keymap(key).map(Event::KeyPress),
            Sdl::KeyUp { keycode: Some(key), repeat: false, .. } => keymap(key).map(Event::KeyUnpress),

            _ => None,
        }
    }
}

pub struct Audio {
    dev: sdl2::audio::AudioDevice<SinWave>,
    is_on: bool,
}

struct SinWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl SinWave {
    pub fn new(freq: f32, spec: &sdl2::audio::AudioSpec) -> SinWave {
        SinWave {
                phase_inc: freq / spec.freq as f32,
                phase: 0.0,
                volume: 0.25,
        }
    }
}

impl sdl2::audio::AudioCallback for SinWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for i in out.iter_mut() {
            let phase = self.phase * 2.0 * std::f32::consts::PI;
            *i = phase.sin() * self.volume;

            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

impl Audio {
    pub fn new(audio_subsystem: sdl2::AudioSubsystem) -> Result<Audio, String> {
        let spec = sdl2::audio::AudioSpecDesired {
            freq: Some(44100),
            channels: Some(1),
            samples: None,
        };
        let dev = audio_subsystem.open_playback(None, &spec, |spec| {
            SinWave::new(BEEP_HZ, &spec)
        })?;
        Ok(Audio {
            dev,
            is_on: false,
        })
    }

    pub fn on(&mut self) {
        if self.is_on {
            return;
        }
        trace!("Sound on");
        self.dev.resume();
        self.is_on = true;
    }

    pub fn off(&mut self) {
        if !self.is_on {
            return;
        }
        trace!("Sound off");
        self.dev.pause();
        self.is_on = false;
    }
}

pub struct Ui {
    pub display: Display,
    pub events: Events,
    pub audio: Audio,
}

impl Ui {
    pub fn new(pixel_size: u32) -> Result<Self, String> {
        let sdl_ctx = sdl2::init()?;
        let video = sdl_ctx.video()?;
        let window = video.window("CHIP-8", pixel_size * arch::DISPLAY_WIDTH, pixel_size * arch::DISPLAY_HEIGHT)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas().accelerated().build().map_err(|e| e.to_string())?;
        canvas.set_draw_color(BACKGROUND_COLOR);
        canvas.clear();
        canvas.present();

        let event_pump = sdl_ctx.event_pump()?;
        let audio_subsystem = sdl_ctx.audio()?;

        Ok(Ui {
            display: Display::new(canvas, pixel_size),
            events: Events::new(event_pump),
            audio: Audio::new(audio_subsystem)?,
        })
    }
}
