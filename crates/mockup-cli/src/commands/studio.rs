use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mockup_core::codec::{natural_size, EncodedImage, SourceImage};
use mockup_core::config::MockupConfig;
use mockup_core::session::{Orchestrator, ResultId, ResultView};
use mockup_core::viewport::{Size, Vec2, ViewerState, WheelDirection};
use tokio::runtime::Runtime;
use tracing::warn;

use super::generate::{run_batch, save_results};
use super::options::{connect, load_source, runtime, MockupArgs};
use crate::summary;

/// Container assumed for the viewer until `resize` says otherwise.
const DEFAULT_CONTAINER: Size = Size::new(1280.0, 800.0);

#[derive(Args)]
pub struct StudioArgs {
    /// Product image (PNG, JPEG or WEBP)
    pub image: PathBuf,

    #[command(flatten)]
    pub mockup: MockupArgs,
}

const HELP: &str = "\
  generate                 run a new batch (replaces the current results)
  list                     show the result grid
  edit <n>                 edit the prompt of result n and regenerate it
  view <n>                 open result n in the viewer
  save <dir>               write the current results to <dir>
  quit

  in the viewer:
  + / -                    zoom in / out
  wheel up|down            wheel zoom step
  drag <dx> <dy>           pan by dragging
  fit                      fit the image to the screen
  resize <w> <h>           resize the viewer
  regen                    regenerate with the current prompt
  close                    back to the grid
";

/// Full-screen viewer over one result, referenced by id.
struct Viewer {
    state: ViewerState,
    view: ResultView,
    shown_revision: u32,
}

struct Studio {
    orchestrator: Orchestrator,
    runtime: Runtime,
    config: MockupConfig,
    source: SourceImage,
    container: Size,
    viewer: Option<Viewer>,
}

pub fn run(args: &StudioArgs) -> Result<()> {
    let studio = args.mockup.load()?;
    studio.mockup.validate()?;
    let source = load_source(&args.image)?;

    let mut session = Studio {
        orchestrator: connect(&studio)?,
        runtime: runtime()?,
        config: studio.mockup,
        source,
        container: DEFAULT_CONTAINER,
        viewer: None,
    };

    println!("Loaded {}. Type `help` for commands.", session.source.name);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", if session.viewer.is_some() { "view> " } else { "studio> " });
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        if matches!(words[0], "quit" | "exit") {
            break;
        }

        let outcome = if session.viewer.is_some() {
            session.viewer_command(&words)
        } else {
            session.grid_command(&words, &mut lines)
        };
        if let Err(err) = outcome {
            summary::print_error(&format!("{err:#}"));
        }
    }

    Ok(())
}

impl Studio {
    fn grid_command(
        &mut self,
        words: &[&str],
        lines: &mut impl Iterator<Item = io::Result<String>>,
    ) -> Result<()> {
        match words {
            ["help"] => print!("{HELP}"),
            ["generate"] => {
                let results = self.runtime.block_on(run_batch(
                    &self.orchestrator,
                    &self.config,
                    &self.source,
                ))?;
                println!("{} mockups ready.", results.len());
                summary::print_grid(&self.orchestrator.snapshot());
            }
            ["list"] => summary::print_grid(&self.orchestrator.snapshot()),
            ["edit", n] => {
                let id = self.result_at(n)?;
                self.edit(id, lines)?;
            }
            ["view", n] => {
                let id = self.result_at(n)?;
                self.open_viewer(id)?;
            }
            ["save", dir] => {
                let results = self.orchestrator.snapshot().results;
                anyhow::ensure!(!results.is_empty(), "Nothing to save yet");
                let written = save_results(&results, Path::new(dir))?;
                summary::print_saved(&written);
            }
            _ => anyhow::bail!("Unknown command `{}`, try `help`", words.join(" ")),
        }
        Ok(())
    }

    fn viewer_command(&mut self, words: &[&str]) -> Result<()> {
        let Some(viewer) = self.viewer.as_mut() else {
            return Ok(());
        };

        match words {
            ["+"] => viewer.state.zoom_in(),
            ["-"] => viewer.state.zoom_out(),
            ["wheel", "up"] => viewer.state.wheel(WheelDirection::Up),
            ["wheel", "down"] => viewer.state.wheel(WheelDirection::Down),
            ["drag", dx, dy] => {
                let delta = Vec2::new(parse_f32(dx)?, parse_f32(dy)?);
                viewer.state.press(Vec2::ZERO);
                viewer.state.pointer_moved(delta);
                viewer.state.release();
            }
            ["fit"] => viewer.state.fit_to_screen(),
            ["resize", w, h] => {
                self.container = Size::new(parse_f32(w)?, parse_f32(h)?);
                viewer.state.resize(self.container);
            }
            ["regen"] => {
                let id = viewer.state.result_id();
                let prompt = viewer
                    .view
                    .current()
                    .map(|r| r.prompt)
                    .context("Result is no longer part of the session")?;
                self.spawn_regenerate(id, prompt);
            }
            ["close"] => {
                self.viewer = None;
                return Ok(());
            }
            ["help"] => print!("{HELP}"),
            _ => anyhow::bail!("Unknown viewer command `{}`, try `help`", words.join(" ")),
        }

        self.refresh_viewer();
        Ok(())
    }

    /// Id of the 1-based grid position `n`.
    fn result_at(&self, n: &str) -> Result<ResultId> {
        let index: usize = n.parse().with_context(|| format!("`{n}` is not a number"))?;
        let state = self.orchestrator.snapshot();
        index
            .checked_sub(1)
            .and_then(|i| state.results.get(i))
            .map(|r| r.id)
            .with_context(|| format!("No result #{n}"))
    }

    /// The edit dialog: multi-line prompt entry ending with a lone `.`, then an
    /// awaited regeneration. An empty entry cancels.
    fn edit(
        &mut self,
        id: ResultId,
        lines: &mut impl Iterator<Item = io::Result<String>>,
    ) -> Result<()> {
        let view = self
            .orchestrator
            .view(id)
            .context("Result is no longer part of the session")?;
        if view.is_regenerating() {
            anyhow::bail!("Result {id} is already being regenerated");
        }
        let current = view.current().context("Result is no longer part of the session")?;

        println!("Current prompt for {id}:");
        println!("{}", current.prompt);
        println!("Enter the new prompt, end with a line containing only `.`:");

        let mut prompt = String::new();
        for line in lines.by_ref() {
            let line = line?;
            if line.trim() == "." {
                break;
            }
            prompt.push_str(&line);
            prompt.push('\n');
        }
        if prompt.trim().is_empty() {
            println!("Edit cancelled.");
            return Ok(());
        }

        println!("Regenerating {id}...");
        let updated = self.runtime.block_on(self.orchestrator.regenerate(id, prompt))?;
        println!("{} updated (rev {}).", updated.id, updated.revision);
        Ok(())
    }

    fn open_viewer(&mut self, id: ResultId) -> Result<()> {
        let view = self
            .orchestrator
            .view(id)
            .context("Result is no longer part of the session")?;
        let current = view.current().context("Result is no longer part of the session")?;
        let image = image_size(&current.image, self.container);

        let state = ViewerState::open(id, self.container, image);
        summary::print_viewer(&state, current.revision);
        self.viewer = Some(Viewer {
            state,
            view,
            shown_revision: current.revision,
        });
        Ok(())
    }

    /// Pick up a regenerated image without resetting pan and zoom.
    fn refresh_viewer(&mut self) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        match viewer.view.current() {
            Some(result) => {
                if result.revision != viewer.shown_revision {
                    let image = image_size(&result.image, self.container);
                    viewer.state.show(result.id, image);
                    viewer.shown_revision = result.revision;
                    println!("  Updated to revision {}.", result.revision);
                }
                summary::print_viewer(&viewer.state, viewer.shown_revision);
            }
            None => {
                println!("  Result was replaced by a new batch, closing viewer.");
                self.viewer = None;
            }
        }
    }

    /// Regenerate in the background; the viewer keeps working meanwhile.
    fn spawn_regenerate(&self, id: ResultId, prompt: String) {
        let orchestrator = self.orchestrator.clone();
        self.runtime.spawn(async move {
            match orchestrator.regenerate(id, prompt).await {
                Ok(result) => println!("\n  {} regenerated (rev {}).", result.id, result.revision),
                Err(err) => {
                    warn!(%id, error = %err, "Background regeneration failed");
                    summary::print_error(&err.to_string());
                }
            }
        });
        println!("  Regenerating {id} in the background...");
    }
}

/// Natural size of a result, or the container when the header is unreadable.
fn image_size(image: &EncodedImage, container: Size) -> Size {
    natural_size(image).unwrap_or_else(|err| {
        warn!(error = %err, "Could not read image dimensions");
        container
    })
}

fn parse_f32(text: &str) -> Result<f32> {
    text.parse()
        .with_context(|| format!("`{text}` is not a number"))
}
