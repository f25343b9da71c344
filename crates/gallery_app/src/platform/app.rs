use std::io::{self, BufRead, Stdout};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use gallery_core::{parse_page_input, CatalogState};
use gallery_engine::{Coordinator, EngineHandle, FetchSettings};
use gallery_logging::{gallery_debug, gallery_info, gallery_warn};

use super::ui::commands::{Command, HELP};
use super::ui::render::Renderer;

type SharedRenderer = Arc<Mutex<Renderer<Stdout>>>;

pub fn run_app() -> anyhow::Result<()> {
    gallery_logging::initialize();

    let settings = FetchSettings::default();
    let request_timeout = settings.request_timeout;
    gallery_info!("Browsing catalog at {}", settings.base_url);
    let state = CatalogState::with_image_base(settings.image_base_url.clone());
    let mut coordinator = Coordinator::with_state(EngineHandle::new(settings), state);

    let renderer: SharedRenderer = Arc::new(Mutex::new(Renderer::new(io::stdout())));
    let subscriber_renderer = renderer.clone();
    coordinator.subscribe(move |view| {
        let mut renderer = subscriber_renderer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = renderer.render(view) {
            gallery_warn!("Failed to render view: {}", err);
        }
    });

    let line_rx = spawn_stdin_reader();

    write_line(&renderer, "Artworks - type `help` for commands.")?;
    // The list starts empty; load the first page explicitly.
    coordinator.fetch_page(1);

    loop {
        coordinator.pump();
        match line_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(line) => {
                let command = Command::parse(&line);
                if command == Command::Quit {
                    break;
                }
                handle_command(&mut coordinator, &renderer, command)?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed: let the last request land before exiting.
                coordinator.wait_idle(request_timeout);
                break;
            }
        }
    }

    gallery_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

fn handle_command(
    coordinator: &mut Coordinator,
    renderer: &SharedRenderer,
    command: Command,
) -> anyhow::Result<()> {
    let view = coordinator.view();
    match command {
        Command::More => {
            if view.has_more {
                coordinator.fetch_next();
            } else if !view.is_loading {
                write_line(renderer, "End of catalog.")?;
            }
        }
        Command::Jump(text) => match parse_page_input(&text, view.total_pages) {
            Ok(page) => coordinator.jump_to_page(i64::from(page)),
            Err(err) => gallery_debug!("Ignoring jump input: {}", err),
        },
        Command::Show(row) => match view.rows.get(row - 1) {
            Some(artwork) => coordinator.open_artwork(artwork.id),
            None => gallery_debug!("No artwork on row {}", row),
        },
        Command::Back => {
            coordinator.close_artwork();
            lock(renderer)
                .render_list(&coordinator.view())
                .context("writing list")?;
        }
        Command::List => lock(renderer)
            .render_list(&view)
            .context("writing list")?,
        Command::Help => write_line(renderer, HELP)?,
        Command::Unknown(text) => {
            write_line(renderer, &format!("Unknown command `{text}`; type `help`."))?;
        }
        Command::Quit => {}
    }
    Ok(())
}

fn lock(renderer: &SharedRenderer) -> std::sync::MutexGuard<'_, Renderer<Stdout>> {
    renderer.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_line(renderer: &SharedRenderer, line: &str) -> anyhow::Result<()> {
    lock(renderer)
        .write_line(line)
        .context("writing to stdout")
}
