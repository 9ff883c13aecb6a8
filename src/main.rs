//! Etch Sketch entry point
//!
//! Headless host: loads settings and the stored picture, replays a frame
//! script through the sketch, and saves on minimise and at exit.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `etch_sketch::sim::tick` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::ffi::OsString;
    use std::fs::File;
    use std::io::{self, BufRead, BufReader};
    use std::path::PathBuf;

    use anyhow::{Context, bail};

    use etch_sketch::Settings;
    use etch_sketch::persistence::PictureStore;
    use etch_sketch::platform::{InputSource, ScriptedInput};
    use etch_sketch::renderer::build_frame;
    use etch_sketch::sim::{SketchEvent, SketchState, TickInput, tick};

    struct Args {
        settings: Option<PathBuf>,
        picture: PathBuf,
        script: Option<PathBuf>,
    }

    fn parse_args(args: impl IntoIterator<Item = OsString>) -> anyhow::Result<Args> {
        let mut settings = None;
        let mut positional = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--settings" {
                let path = args.next().context("--settings needs a file")?;
                settings = Some(PathBuf::from(path));
            } else {
                positional.push(PathBuf::from(arg));
            }
        }

        let mut positional = positional.into_iter();
        match (positional.next(), positional.next(), positional.next()) {
            (Some(picture), script, None) => Ok(Args {
                settings,
                picture,
                script,
            }),
            _ => bail!(
                "usage: {} [--settings FILE] <picture-file> [script-file]",
                env!("CARGO_PKG_NAME")
            ),
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::builder()
            .filter_module("etch_sketch", log::LevelFilter::Info)
            .parse_default_env()
            .init();

        let args = parse_args(std::env::args_os().skip(1))?;
        log::info!("Etch Sketch (headless) starting...");

        let settings = match &args.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let store = PictureStore::new(&args.picture);
        let (picture, load_err) = store.load_or_default(&settings);
        let mut state = SketchState::with_picture(settings, picture);
        if let Some(err) = &load_err {
            state.report_storage_error(err);
        }

        let reader: Box<dyn BufRead> = match &args.script {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("opening {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };
        let mut source = ScriptedInput::new(reader);
        let mut input = TickInput::default();

        while let Some(sample) = source.next_frame(&mut input.buttons) {
            input.accel = sample.accel;
            tick(&mut state, &mut input, sample.dt);

            for event in state.drain_events() {
                match event {
                    SketchEvent::MinimiseRequested => {
                        if let Err(e) = store.save(&state.picture) {
                            state.report_storage_error(&e);
                        }
                    }
                    SketchEvent::Cleared => log::info!("Picture cleared"),
                    other => log::debug!("{other:?}"),
                }
            }

            let frame = build_frame(&state);
            log::trace!(
                "frame {}: {} commands, rotation {:.3}",
                state.frames,
                frame.commands.len(),
                frame.rotation
            );
        }

        if let Err(e) = store.save(&state.picture) {
            state.report_storage_error(&e);
            return Err(e.into());
        }

        log::info!(
            "{} frames, {} segments, pen at ({}, {}), {} script lines skipped",
            state.frames,
            state.picture.len(),
            state.pen().x,
            state.pen().y,
            source.skipped()
        );
        Ok(())
    }

}
