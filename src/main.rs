mod ui;

use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use log::{info, trace, warn};

use chip8vm::arch;
use chip8vm::clock::{self, Control, CpuReport, Pacer};
use chip8vm::{Chip, Profile};

use crate::ui::Event;

fn join(cpu: JoinHandle<CpuReport>) -> Result<CpuReport, Box<dyn Error>> {
    cpu.join().map_err(|_| "CPU thread panicked".into())
}

fn main() -> Result<(), Box<dyn Error>> {

    env_logger::init();

    let args = clap::App::new("Chip-8 emulator")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .arg(clap::Arg::new("rom_path")
             .help("ROM file name.")
             .long("rom_path")
             .short('r')
             .value_name("path")
             .takes_value(true)
             .default_value("rom/tests/ibm.ch8"))
        .arg(clap::Arg::new("profile")
             .help("Chip-8 profile.")
             .long("profile")
             .short('p')
             .value_parser(["original", "modern"])
             .default_value("modern"))
        .arg(clap::Arg::new("cpu_hz")
             .help("Instructions per second.")
             .long("cpu_hz")
             .short('c')
             .value_parser(clap::value_parser!(u32))
             .default_value("700"))
        .arg(clap::Arg::new("scale")
             .help("Size of one Chip-8 pixel on screen.")
             .long("scale")
             .short('s')
             .value_parser(clap::value_parser!(u32).range(2..=40))
             .default_value("14"))
        .arg(clap::Arg::new("seed")
             .help("Seed for the RND instruction.")
             .long("seed")
             .value_parser(clap::value_parser!(u64)))
        .arg(clap::Arg::new("fast")
             .help("Run emulation as fast as possible.")
             .long("fast")
             .short('f')
             .action(clap::ArgAction::SetTrue))
        .get_matches();

    let rom_name = args.get_one::<String>("rom_path").ok_or("missing ROM path")?;
    let mut f = File::open(rom_name)?;

    let mut buffer = Vec::new();
    f.read_to_end(&mut buffer)?;

    let profile: Profile = args.get_one::<String>("profile").ok_or("missing profile")?.parse()?;
    let cpu_hz = *args.get_one::<u32>("cpu_hz").unwrap_or(&arch::DEFAULT_CPU_HZ);
    let scale = *args.get_one::<u32>("scale").unwrap_or(&14);
    let fast = *args.get_one::<bool>("fast").unwrap_or(&false);

    let mut chip = match args.get_one::<u64>("seed") {
        Some(seed) => Chip::new_seed(*seed, profile),
        None => Chip::new(profile),
    };
    chip.load_rom(&buffer)?;
    info!("Running {} with {:?}", rom_name, profile);

    let peripherals = chip.peripherals();
    let mut ui = ui::Ui::new(scale)?;

    let mut control = Arc::new(Control::new(cpu_hz, fast));
    let mut cpu = clock::spawn_cpu(chip, Arc::clone(&control))?;
    let mut cpu_stop_reported = false;

    let start = Instant::now();
    let mut frames = Pacer::frames();
    let mut frame_count: u64 = 0;
    let mut running = true;

    while running {
        frames.wait();

        let mut reset = false;
        for e in ui.events.poll_iter() {
            match e {
                Event::Quit => { info!("Quit!"); running = false },
                Event::KeyPress(key) => { trace!("Key pressed: {}", key); peripherals.keyboard.press(key) },
                Event::KeyUnpress(key) => { trace!("Key unpressed {}", key); peripherals.keyboard.release(key) },
                Event::Faster => { control.faster(); },
                Event::Slower => { control.slower(); },
                Event::Reset => reset = true,
            }
        }

        if reset {
            control.stop();
            let mut chip = join(cpu)?.chip;
            chip.reset();
            peripherals.keyboard.release_all();
            control = Arc::new(Control::new(control.cpu_hz(), control.is_fast()));
            cpu = clock::spawn_cpu(chip, Arc::clone(&control))?;
            cpu_stop_reported = false;
        }

        // A halted CPU leaves the last frame on screen until reset or quit.
        if cpu.is_finished() && !cpu_stop_reported {
            warn!("CPU stopped, Backspace resets");
            cpu_stop_reported = true;
        }

        if peripherals.tick_timers() {
            ui.audio.on();
        } else {
            ui.audio.off();
        }

        ui.display.present_frame(peripherals.snapshot().get_frame())?;
        frame_count += 1;
    }

    control.stop();
    let report = join(cpu)?;

    let duration_ms = start.elapsed().as_millis().max(1);
    let cycles = report.chip.cycles();
    let cps: f64 = 1000.0 * cycles as f64 / duration_ms as f64;

    println!("Stats.");
    println!("Execution time: {} ms", duration_ms);
    println!("Cycles: {}", cycles);
    println!("Cycles per second: {}", cps);
    println!("Frames: {}", frame_count);
    if let Some(e) = report.error {
        println!("CPU halted: {}", e);
    }

    Ok(())
}
