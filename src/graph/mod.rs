mod assets;
mod data;
mod routes;

pub use data::{GraphData, generate_static_html};
pub use routes::{AppState, serve};
