use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod error;
mod gallery;
mod geometry;
mod loader;
mod model;
mod parser;
mod renderer;
mod scene;
mod settings;
mod ui;
mod viewer;

pub const CONFY_APP_NAME: &str = "folio3d";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional start page: about, gallery or computer
    let start_page = match std::env::args().nth(1) {
        Some(arg) => match ui::Page::from_arg(&arg) {
            Some(page) => Some(page),
            None => anyhow::bail!("unknown page '{}' (expected about, gallery or computer)", arg),
        },
        None => None,
    };

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let mut handler = app::AppHandler::new(runtime, start_page);

    event_loop.run_app(&mut handler)?;

    Ok(())
}
