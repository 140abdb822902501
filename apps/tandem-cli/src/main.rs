mod args;
mod screenshot;

use std::{cell::RefCell, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use tandem_core::{Nes, controller::Controller, display::FrameBuffer};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::args::Args;

fn init_tracing(args: &Args) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let mut filter = EnvFilter::try_new(&args.log_level)
                .with_context(|| format!("invalid log level `{}`", args.log_level))?;
            if args.trace_cpu {
                filter = filter.add_directive(
                    "tandem_core::cpu=trace"
                        .parse()
                        .context("building CPU trace directive")?,
                );
            }
            filter
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let screen = Rc::new(RefCell::new(FrameBuffer::new()));
    let pad = Rc::new(RefCell::new(Controller::new()));
    for &button in &args.hold {
        pad.borrow_mut().set_button(button.into(), true);
    }

    let mut nes = Nes::with_devices(Box::new(screen.clone()), Box::new(pad));
    nes.load_cartridge_from_file(&args.rom)
        .with_context(|| format!("loading {}", args.rom.display()))?;

    for _ in 0..args.frames {
        nes.run_frame();
    }

    let cpu = nes.cpu();
    info!(
        frames = nes.ppu().frame(),
        cpu_cycles = nes.total_cycles(),
        pc = format_args!("{:#06X}", cpu.pc),
        "run finished"
    );

    if let Some(path) = &args.screenshot {
        screenshot::write_png(path, &screen.borrow())?;
        info!(path = %path.display(), "screenshot written");
    }
    if let Some(dir) = &args.dump_debug {
        screenshot::dump_debug(dir, nes.ppu())?;
        info!(dir = %dir.display(), "debug views written");
    }
    Ok(())
}
