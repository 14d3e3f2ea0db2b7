pub mod fullscreen;
pub mod watch;

pub use fullscreen::StubFullscreenHost;
pub use watch::{RecordingProgressService, StubCatalogService};
