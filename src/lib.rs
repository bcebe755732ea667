//! Rectboard - interactive rectangle selections over a fixed-size surface.
//!
//! The engine covers hit testing, constrained move/resize, the committed
//! selection list with asynchronous host confirmation, and the highlight
//! overlay. Rendering is left to the host: everything here is plain values
//! the renderer projects.
//!
//! ```ignore
//! let mut controller = InteractionController::new(EngineSettings::default());
//! controller.set_tool(Tool::Add);
//! controller.pointer_down(Point::new(10.0, 10.0))?;
//! if let Some(request) = controller.pointer_up(Point::new(60.0, 50.0))? {
//!     pollster::block_on(controller.settle_add(&AcceptAll, request))?;
//! }
//! ```

pub mod constants;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod perf;
pub mod replay;
pub mod selection;
pub mod session;
pub mod settings;
pub mod spatial_index;
pub mod types;

pub use error::{SelectionError, SelectionResult};
pub use input::{InteractionController, Mode, Tool};
pub use selection::{AcceptAll, AddDecision, RemoveDecision, SelectionHost, SelectionStore};
pub use settings::EngineSettings;
pub use types::{HighlightCoords, Point, Rectangle, SelectionGeometry, Surface};
