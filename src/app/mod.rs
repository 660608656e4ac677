mod app;
mod handler;

pub use app::App;
pub use handler::AppHandler;
