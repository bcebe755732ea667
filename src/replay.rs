//! Pointer-script replay.
//!
//! A script is a JSON document describing an initial selection list, the
//! host's canned answers and a sequence of input steps:
//!
//! ```json
//! {
//!   "rectangles": [{ "id": 7, "x": 10, "y": 10, "width": 50, "height": 40 }],
//!   "viewport": { "x": 0, "y": 0, "width": 700, "height": 318 },
//!   "host": { "add": ["accept", { "adopt": 42 }, "fail"], "remove": ["keep"] },
//!   "steps": [
//!     { "tool": "add" },
//!     { "down": { "x": 100, "y": 100 } },
//!     { "move": { "x": 160, "y": 140 } },
//!     { "up": { "x": 160, "y": 140 } },
//!     "confirm",
//!     "leave"
//!   ]
//! }
//! ```
//!
//! With a viewport, pointer positions are screen coordinates and are mapped
//! into the surface first. The host answers in script order and accepts
//! everything once its list runs out.

use crate::error::{SelectionError, SelectionResult};
use crate::highlight::HighlightMask;
use crate::input::coords::{CoordinateContext, CoordinateConverter, Viewport};
use crate::input::{InteractionController, Tool};
use crate::selection::{
    AddDecision, ConfirmationKind, HostError, RemoveDecision, SelectionHost,
};
use crate::settings::EngineSettings;
use crate::types::{HighlightCoords, Point, Rectangle, SelectionGeometry};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Canned answer to an add confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptedAdd {
    Accept,
    Adopt(u64),
    Reject,
    Fail,
}

/// Canned answer to a remove confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptedRemove {
    Remove,
    Keep,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostScript {
    pub add: Vec<ScriptedAdd>,
    pub remove: Vec<ScriptedRemove>,
}

/// Host answering from a script; logs hover notifications.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    add: RefCell<VecDeque<ScriptedAdd>>,
    remove: RefCell<VecDeque<ScriptedRemove>>,
    hovers: RefCell<Vec<u64>>,
}

impl ScriptedHost {
    pub fn new(script: HostScript) -> Self {
        Self {
            add: RefCell::new(script.add.into()),
            remove: RefCell::new(script.remove.into()),
            hovers: RefCell::new(Vec::new()),
        }
    }

    /// Ids of rectangles the pointer entered, in order.
    pub fn hovers(&self) -> Vec<u64> {
        self.hovers.borrow().clone()
    }
}

impl SelectionHost for ScriptedHost {
    async fn confirm_add(
        &self,
        candidate: &SelectionGeometry,
        existing_id: Option<u64>,
    ) -> Result<AddDecision, HostError> {
        let answer = self.add.borrow_mut().pop_front().unwrap_or(ScriptedAdd::Accept);
        debug!(?candidate, ?existing_id, ?answer, "host asked to add");
        match answer {
            ScriptedAdd::Accept => Ok(AddDecision::Accept),
            ScriptedAdd::Adopt(id) => Ok(AddDecision::Adopt(id)),
            ScriptedAdd::Reject => Ok(AddDecision::Reject),
            ScriptedAdd::Fail => Err(HostError::new("scripted add failure")),
        }
    }

    async fn confirm_remove(
        &self,
        id: u64,
        _rectangle: &Rectangle,
    ) -> Result<RemoveDecision, HostError> {
        let answer = self
            .remove
            .borrow_mut()
            .pop_front()
            .unwrap_or(ScriptedRemove::Remove);
        debug!(id, ?answer, "host asked to remove");
        match answer {
            ScriptedRemove::Remove => Ok(RemoveDecision::Remove),
            ScriptedRemove::Keep => Ok(RemoveDecision::Keep),
            ScriptedRemove::Fail => Err(HostError::new("scripted remove failure")),
        }
    }

    fn rect_hover(&self, rectangle: &Rectangle) {
        info!(id = rectangle.id, "hover");
        self.hovers.borrow_mut().push(rectangle.id);
    }

    fn rect_hover_out(&self, rectangle: &Rectangle) {
        info!(id = rectangle.id, "hover out");
    }
}

/// One input step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Tool(Tool),
    Down(Point),
    Move(Point),
    Up(Point),
    Leave,
    /// Confirm gesture on the staged draft
    Confirm,
    /// Remove gesture on the remove target
    Remove,
    /// Ask the host again about a confirmation whose hook failed
    Retry,
    Abandon,
    Highlight(HighlightCoords),
    /// External sync of the committed list
    Value(Vec<Rectangle>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub rectangles: Vec<Rectangle>,
    pub viewport: Option<Viewport>,
    pub host: HostScript,
    pub steps: Vec<Step>,
}

/// State after the last step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub rectangles: Vec<Rectangle>,
    pub pending: Option<ConfirmationKind>,
    pub staged: Option<SelectionGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

/// Run `script` against a fresh controller.
pub fn run(settings: EngineSettings, script: Script) -> SelectionResult<Report> {
    let host = ScriptedHost::new(script.host);
    let mut controller = InteractionController::with_rectangles(settings, script.rectangles);
    let viewport = script.viewport;

    for (index, step) in script.steps.into_iter().enumerate() {
        debug!(index, ?step, "replaying step");
        let step = match viewport {
            Some(viewport) => to_surface(step, &viewport, &controller),
            None => step,
        };
        pollster::block_on(apply(&mut controller, &host, step))?;
    }

    Ok(Report {
        rectangles: controller.rectangles().to_vec(),
        pending: controller.confirmation_state().kind,
        staged: controller.staged().map(|s| s.geometry),
        highlight: controller.highlight_mask().map(HighlightMask::to_svg_path),
    })
}

fn to_surface(step: Step, viewport: &Viewport, controller: &InteractionController) -> Step {
    let surface = controller.surface();
    let ctx = CoordinateContext::new(viewport, &surface);
    let convert = |p: Point| CoordinateConverter::screen_to_surface(p, &ctx);
    match step {
        Step::Down(p) => Step::Down(convert(p)),
        Step::Move(p) => Step::Move(convert(p)),
        Step::Up(p) => Step::Up(convert(p)),
        other => other,
    }
}

async fn apply(
    controller: &mut InteractionController,
    host: &ScriptedHost,
    step: Step,
) -> SelectionResult<()> {
    let result = match step {
        Step::Tool(tool) => {
            controller.set_tool(tool);
            Ok(())
        }
        Step::Down(point) => controller.pointer_down(point).map(drop),
        Step::Move(point) => controller.pointer_move(point).map(|feedback| {
            if let Some(change) = feedback.hover {
                change.notify(host);
            }
        }),
        Step::Up(point) => match controller.pointer_up(point) {
            Ok(Some(request)) => controller.settle_add(host, request).await.map(drop),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        },
        Step::Leave => controller.pointer_leave().map(|change| {
            if let Some(change) = change {
                change.notify(host);
            }
        }),
        Step::Confirm => controller.commit_staged(host).await.map(drop),
        Step::Remove => controller.commit_remove(host).await.map(drop),
        Step::Retry => retry(controller, host).await,
        Step::Abandon => {
            controller.abandon_pending();
            Ok(())
        }
        Step::Highlight(coords) => {
            controller.set_highlight(coords);
            Ok(())
        }
        Step::Value(rectangles) => {
            controller.set_value(rectangles);
            Ok(())
        }
    };

    match result {
        Err(err) if err.is_silent() => {
            debug!("step ignored: {}", err);
            Ok(())
        }
        Err(SelectionError::HostConfirmationFailed(err)) => {
            warn!("host failed, confirmation left pending: {}", err);
            Ok(())
        }
        other => other,
    }
}

async fn retry(controller: &mut InteractionController, host: &ScriptedHost) -> SelectionResult<()> {
    if let Some(request) = controller.store().pending_add_request() {
        return controller.settle_add(host, request).await.map(drop);
    }
    if let Some(request) = controller.store().pending_remove_request() {
        return controller.settle_remove(host, request).await.map(drop);
    }
    Err(SelectionError::NoPendingConfirmation)
}
