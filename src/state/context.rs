/// The main context for the editor, owning the canvases, the tools and the
/// interaction state, and coordinating between them.
///
/// Every edit goes through here. The context makes sure that:
/// - only one interaction is in flight at a time, on the active canvas;
/// - a stroke in flight is committed before the active tool or canvas
///   changes, and before undo/redo touch the buffer;
/// - every visible change is announced on the [`EventBus`].
///
/// # Example
///
/// ```rust,no_run
/// use pixel_paint::{Color, EditorContext, EditorSettings, Point};
///
/// let mut context = EditorContext::new(EditorSettings::default());
/// context.create_canvas(64, 64, Color::WHITE);
///
/// context.begin_stroke(Point::new(4, 4)).ok();
/// context.apply_brush_dab(Point::new(40, 20)).ok();
/// context.end_stroke().ok();
///
/// context.undo().ok();
/// ```
use log::{debug, info, warn};

use crate::color::Color;
use crate::document::{Canvas, CanvasId, Workspace};
use crate::error::{PaintError, PaintResult};
use crate::event::{EditorEvent, EventBus, HistoryAction};
use crate::geometry::{Point, Rect};
use crate::raster::sample_at;
use crate::tool::{
    BrushTool, DropperTool, FillTool, OptionValue, Tool, ToolKind, ToolOption, ToolOutcome, ToolType,
};
use super::{EditorSettings, EditorState};

#[derive(Debug)]
pub struct EditorContext {
    /// The current interaction state
    state: EditorState,
    /// The open canvases
    workspace: Workspace,
    /// One instance per tool kind, indexed by `ToolKind as usize`
    tools: [ToolType; 3],
    active_tool: ToolKind,
    settings: EditorSettings,
    untitled: usize,
    /// The event bus for broadcasting editor events
    pub event_bus: EventBus,
}

impl EditorContext {
    /// Creates a context with no canvas, the brush active and tools
    /// configured from `settings`.
    pub fn new(settings: EditorSettings) -> Self {
        let tools = [
            ToolType::Brush(BrushTool::new(settings.brush, settings.brush_supersample)),
            ToolType::Fill(FillTool::new(settings.fill)),
            ToolType::Dropper(DropperTool::new()),
        ];
        Self {
            state: EditorState::Idle,
            workspace: Workspace::new(),
            tools,
            active_tool: ToolKind::Brush,
            settings,
            untitled: 0,
            event_bus: EventBus::new(),
        }
    }

    pub fn current_state(&self) -> &EditorState {
        &self.state
    }

    /// The settings the context was built with, with the tool defaults
    /// replaced by the tools' current configuration.
    pub fn settings(&self) -> EditorSettings {
        let mut settings = self.settings.clone();
        if let Some(brush) = self.tool(ToolKind::Brush).as_brush() {
            settings.brush = *brush.config();
        }
        if let Some(fill) = self.tool(ToolKind::Fill).as_fill() {
            settings.fill = *fill.config();
        }
        settings
    }

    // ----- canvases -----

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn active_canvas(&self) -> Option<&Canvas> {
        self.workspace.active()
    }

    /// Creates a blank canvas and makes it the active one
    pub fn create_canvas(&mut self, width: u32, height: u32, background: Color) -> CanvasId {
        self.untitled += 1;
        let canvas = Canvas::new(
            format!("Untitled {}", self.untitled),
            width,
            height,
            background,
            self.settings.history_depth,
        );
        self.add_canvas(canvas)
    }

    /// Adds an existing canvas, e.g. one loaded from disk, and activates it
    pub fn add_canvas(&mut self, canvas: Canvas) -> CanvasId {
        self.commit_in_flight();
        let (width, height) = (canvas.width(), canvas.height());
        let id = self.workspace.add(canvas);
        info!("Created canvas {id} ({width}x{height})");
        self.event_bus.emit(EditorEvent::CanvasCreated {
            canvas: id,
            width,
            height,
        });
        // add() only activates the first canvas
        if self.workspace.active_id() != Some(id) && self.workspace.set_active(id).is_ok() {
            self.event_bus
                .emit(EditorEvent::ActiveCanvasChanged { canvas: id });
        }
        id
    }

    /// Makes `id` the target of the tools, committing any stroke in flight first
    pub fn set_active_canvas(&mut self, id: CanvasId) -> PaintResult<()> {
        if self.workspace.active_id() == Some(id) {
            return Ok(());
        }
        if self.workspace.get(id).is_none() {
            return Err(PaintError::NoActiveCanvas);
        }
        self.commit_in_flight();
        self.workspace.set_active(id)?;
        debug!("Active canvas is now {id}");
        self.event_bus
            .emit(EditorEvent::ActiveCanvasChanged { canvas: id });
        Ok(())
    }

    pub fn close_canvas(&mut self, id: CanvasId) -> Option<Canvas> {
        if self.workspace.active_id() == Some(id) {
            self.commit_in_flight();
        }
        let canvas = self.workspace.remove(id)?;
        info!("Closed canvas {id}");
        if let Some(active) = self.workspace.active_id() {
            self.event_bus
                .emit(EditorEvent::ActiveCanvasChanged { canvas: active });
        }
        Some(canvas)
    }

    // ----- tools -----

    pub fn tools(&self) -> &[ToolType] {
        &self.tools
    }

    pub fn tool(&self, kind: ToolKind) -> &ToolType {
        &self.tools[kind as usize]
    }

    pub fn active_tool(&self) -> &ToolType {
        self.tool(self.active_tool)
    }

    pub fn active_tool_kind(&self) -> ToolKind {
        self.active_tool
    }

    /// Switches the active tool. A stroke in flight is committed first.
    pub fn set_active_tool(&mut self, kind: ToolKind) {
        if self.active_tool == kind {
            return;
        }
        self.commit_in_flight();
        let old = self.active_tool;
        self.active_tool = kind;
        info!("Tool changed from {} to {}", old.name(), kind.name());
        self.event_bus
            .emit(EditorEvent::ToolChanged { old, new: kind });
    }

    /// Sets an option on the active tool. Names the tool does not recognise
    /// change nothing and are reported as `InvalidToolOption`.
    pub fn set_tool_option(&mut self, name: &str, value: OptionValue) -> PaintResult<()> {
        let option = ToolOption::parse(name, value)?;
        let kind = self.active_tool;
        self.tools[kind as usize].set_option(option).inspect_err(|err| {
            warn!("{} ignored option {name}: {err}", kind.name());
        })
    }

    // ----- pointer protocol -----

    /// Pointer pressed at `point` on the active canvas. Returns whether an
    /// interaction started; a press while another one is in flight is ignored.
    pub fn pointer_down(&mut self, point: Point) -> PaintResult<bool> {
        if !self.state.is_idle() {
            debug!("Ignoring pointer down while {:?}", self.state);
            return Ok(false);
        }
        let canvas = self.workspace.active().ok_or(PaintError::NoActiveCanvas)?;
        if !canvas.contains(point) {
            return Err(PaintError::OutOfBounds {
                point,
                width: canvas.width(),
                height: canvas.height(),
            });
        }

        let kind = self.active_tool;
        self.transition_to(EditorState::for_tool(kind));
        match self.dispatch(|tool, canvas| tool.on_pointer_down(point, canvas)) {
            Ok(_) => {
                if let (EditorState::Painting { tool }, Some(canvas)) =
                    (self.state, self.workspace.active_id())
                {
                    self.event_bus
                        .emit(EditorEvent::StrokeStarted { canvas, tool });
                }
                Ok(true)
            }
            Err(err) => {
                self.transition_to(EditorState::Idle);
                Err(err)
            }
        }
    }

    /// Per-frame update with the current pointer position, which may be off
    /// the canvas while dragging.
    pub fn frame_update(&mut self, pointer: Point) -> PaintResult<()> {
        if self.state.is_idle() {
            return Ok(());
        }
        self.dispatch(|tool, canvas| tool.on_frame_update(pointer, canvas))
            .map(|_| ())
    }

    /// Pointer released: commits the interaction in flight and returns to idle
    pub fn pointer_up(&mut self) -> PaintResult<ToolOutcome> {
        if self.state.is_idle() {
            return Ok(ToolOutcome::Nothing);
        }
        let outcome = self.dispatch(|tool, canvas| tool.on_pointer_up(canvas));
        self.transition_to(EditorState::Idle);
        outcome
    }

    // ----- named entry points -----

    /// Starts a brush stroke at `point`, switching to the brush if needed
    pub fn begin_stroke(&mut self, point: Point) -> PaintResult<()> {
        self.set_active_tool(ToolKind::Brush);
        self.pointer_down(point).map(|_| ())
    }

    /// Continues the current brush stroke to `point`, joining it to the
    /// previous position with a line of dabs.
    pub fn apply_brush_dab(&mut self, point: Point) -> PaintResult<()> {
        if self.state != (EditorState::Painting { tool: ToolKind::Brush }) {
            return Ok(());
        }
        self.frame_update(point)
    }

    /// Commits the current brush stroke, returning the rectangle recorded in history
    pub fn end_stroke(&mut self) -> PaintResult<Option<Rect>> {
        if self.state != (EditorState::Painting { tool: ToolKind::Brush }) {
            return Ok(None);
        }
        Ok(committed_rect(self.pointer_up()?))
    }

    /// Fills from `seed` on the active canvas as one undoable edit. Returns the
    /// filled bounds, or `None` when nothing changed.
    pub fn flood_fill(&mut self, seed: Point) -> PaintResult<Option<Rect>> {
        self.set_active_tool(ToolKind::Fill);
        self.commit_in_flight();
        self.pointer_down(seed)?;
        Ok(committed_rect(self.pointer_up()?))
    }

    /// Reads the committed colour at `point` and hands it to every tool as
    /// its palette colour.
    pub fn sample_color(&mut self, point: Point) -> PaintResult<Color> {
        self.commit_in_flight();
        let canvas = self.workspace.active().ok_or(PaintError::NoActiveCanvas)?;
        let color = sample_at(canvas.buffer(), point)?;
        self.apply_sampled_color(color);
        Ok(color)
    }

    // ----- history -----

    pub fn undo(&mut self) -> PaintResult<Rect> {
        self.apply_history(HistoryAction::Undo)
    }

    pub fn redo(&mut self) -> PaintResult<Rect> {
        self.apply_history(HistoryAction::Redo)
    }

    fn apply_history(&mut self, action: HistoryAction) -> PaintResult<Rect> {
        self.commit_in_flight();
        let canvas = self
            .workspace
            .active_mut()
            .ok_or(PaintError::NoActiveCanvas)?;
        let rect = match action {
            HistoryAction::Undo => canvas.undo()?,
            HistoryAction::Redo => canvas.redo()?,
        };
        let id = canvas.id();
        info!("{action:?} restored {rect:?} on canvas {id}");
        self.event_bus.emit(EditorEvent::HistoryApplied {
            canvas: id,
            action,
            rect,
        });
        self.event_bus
            .emit(EditorEvent::CanvasChanged { canvas: id, rect });
        Ok(rect)
    }

    // ----- internals -----

    /// Runs `f` on the active tool and canvas, then announces the outcome
    fn dispatch(
        &mut self,
        f: impl FnOnce(&mut ToolType, &mut Canvas) -> PaintResult<ToolOutcome>,
    ) -> PaintResult<ToolOutcome> {
        let kind = self.active_tool;
        let canvas = self
            .workspace
            .active_mut()
            .ok_or(PaintError::NoActiveCanvas)?;
        let id = canvas.id();
        let outcome = f(&mut self.tools[kind as usize], canvas)?;
        self.announce(id, kind, outcome);
        Ok(outcome)
    }

    fn announce(&mut self, canvas: CanvasId, tool: ToolKind, outcome: ToolOutcome) {
        match outcome {
            ToolOutcome::Nothing => {}
            ToolOutcome::Changed(rect) => {
                self.event_bus
                    .emit(EditorEvent::CanvasChanged { canvas, rect });
            }
            ToolOutcome::Committed(rect) => {
                self.event_bus
                    .emit(EditorEvent::CanvasChanged { canvas, rect });
                self.event_bus
                    .emit(EditorEvent::StrokeCompleted { canvas, tool, rect });
            }
            ToolOutcome::Sampled(color) => self.apply_sampled_color(color),
        }
    }

    fn apply_sampled_color(&mut self, color: Color) {
        let option = ToolOption::PaletteColour(color.with_alpha(255));
        for tool in &mut self.tools {
            // the dropper has no palette colour
            if tool.set_option(option).is_ok() {
                debug!("{} palette colour set to {color:?}", tool.name());
            }
        }
        self.event_bus.emit(EditorEvent::ColourSampled(color));
    }

    /// Ends whatever interaction is in flight as if the pointer were released
    fn commit_in_flight(&mut self) {
        if self.state.is_idle() {
            return;
        }
        info!("Committing {:?} before switching", self.state);
        if let Err(err) = self.pointer_up() {
            warn!("Forced commit failed: {err}");
        }
    }

    fn transition_to(&mut self, new_state: EditorState) -> bool {
        if !self.state.can_transition_to(&new_state) {
            debug!("Refusing transition {:?} -> {new_state:?}", self.state);
            return false;
        }
        let old = self.state;
        self.state = new_state;
        self.event_bus
            .emit(EditorEvent::StateChanged { old, new: new_state });
        true
    }
}

fn committed_rect(outcome: ToolOutcome) -> Option<Rect> {
    match outcome {
        ToolOutcome::Committed(rect) => Some(rect),
        _ => None,
    }
}
