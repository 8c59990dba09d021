use bevy::prelude::*;
use constants::interaction::ROTATION_PER_PIXEL;
use constants::scene::{MODEL_INITIAL_ROTATION_Y, MODEL_POSITION, MODEL_SCALE};

use super::drag::DragState;
use super::render_loop::RenderLoop;
use crate::error::ViewerError;

/// Proof that a model load was requested by a specific session generation.
/// Completions carrying an outdated ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of `ViewerSession::open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOpened {
    pub ticket: LoadTicket,
    /// Surface of the session that was still open and has now been closed.
    pub replaced_surface: Option<Entity>,
}

/// What happened to a load completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed(ViewerError),
    /// The session was closed or reopened while the load was in flight.
    Stale,
}

/// The loaded model and the rotation accumulated by dragging it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedObject {
    pub entity: Entity,
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl RenderedObject {
    fn placed(entity: Entity) -> Self {
        Self {
            entity,
            rotation_x: 0.0,
            rotation_y: MODEL_INITIAL_ROTATION_Y,
        }
    }

    /// Placement applied when the model first appears.
    pub fn initial_transform() -> Transform {
        Self::placed(Entity::PLACEHOLDER).transform()
    }

    /// Scale and position are fixed; rotation follows the drag (XYZ order).
    pub fn transform(&self) -> Transform {
        Transform::from_translation(MODEL_POSITION)
            .with_scale(Vec3::splat(MODEL_SCALE))
            .with_rotation(Quat::from_euler(
                EulerRot::XYZ,
                self.rotation_x,
                self.rotation_y,
                0.0,
            ))
    }
}

/// State of the single embedded 3D view, from open to close.
#[derive(Resource, Debug, Default)]
pub struct ViewerSession {
    active: bool,
    generation: u64,
    surface: Option<Entity>,
    rendered_object: Option<RenderedObject>,
    drag: DragState,
    render_loop: RenderLoop,
    load_error: Option<ViewerError>,
}

impl ViewerSession {
    /// Start a session on a freshly spawned rendering surface. A session that
    /// is still open is closed first so only one surface ever exists.
    pub fn open(&mut self, surface: Entity) -> SessionOpened {
        let replaced_surface = self.close();

        self.generation += 1;
        self.active = true;
        self.surface = Some(surface);
        self.render_loop.start();

        info!("Viewer session {} opened", self.generation);

        SessionOpened {
            ticket: LoadTicket {
                generation: self.generation,
            },
            replaced_surface,
        }
    }

    /// Tear the session down and hand back the surface to despawn.
    /// Calling this on a closed session does nothing.
    pub fn close(&mut self) -> Option<Entity> {
        if !self.active {
            return None;
        }

        self.active = false;
        self.render_loop.stop();
        self.rendered_object = None;
        self.drag = DragState::default();
        self.load_error = None;

        info!("Viewer session {} closed", self.generation);
        self.surface.take()
    }

    /// Whether a load started with `ticket` may still touch this session.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.active && ticket.generation == self.generation
    }

    /// Apply an asynchronous load result. Failures leave the session open
    /// without a model.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Entity, ViewerError>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }

        match result {
            Ok(entity) => {
                self.rendered_object = Some(RenderedObject::placed(entity));
                self.load_error = None;
                LoadOutcome::Applied
            }
            Err(err) => {
                self.load_error = Some(err.clone());
                LoadOutcome::Failed(err)
            }
        }
    }

    pub fn pointer_down(&mut self, pointer: Vec2) {
        if self.active {
            self.drag.press(pointer);
        }
    }

    /// Rotate the model by the drag delta. Returns the rotation applied as
    /// (x, y) radians, or `None` when nothing was rotated.
    pub fn pointer_move(&mut self, pointer: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }

        let delta = self.drag.track(pointer)?;
        let object = self.rendered_object.as_mut()?;

        let step = Vec2::new(delta.y, delta.x) * ROTATION_PER_PIXEL;
        object.rotation_x += step.x;
        object.rotation_y += step.y;
        Some(step)
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    pub fn pointer_leave(&mut self) {
        self.drag.release();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> Option<Entity> {
        self.surface
    }

    pub fn rendered_object(&self) -> Option<&RenderedObject> {
        self.rendered_object.as_ref()
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn render_loop_mut(&mut self) -> &mut RenderLoop {
        &mut self.render_loop
    }

    pub fn load_error(&self) -> Option<&ViewerError> {
        self.load_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Entity {
        Entity::from_raw(1)
    }

    fn model() -> Entity {
        Entity::from_raw(2)
    }

    fn open_with_model(session: &mut ViewerSession) -> LoadTicket {
        let ticket = session.open(surface()).ticket;
        assert_eq!(session.complete_load(ticket, Ok(model())), LoadOutcome::Applied);
        ticket
    }

    fn rotation(session: &ViewerSession) -> (f32, f32) {
        let object = session.rendered_object().expect("model loaded");
        (object.rotation_x, object.rotation_y)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn drag_rotates_by_scaled_delta_and_stops_after_release() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);

        session.pointer_down(Vec2::new(100.0, 100.0));
        session.pointer_move(Vec2::new(110.0, 115.0));

        let (x, y) = rotation(&session);
        assert_close(x, 15.0 * ROTATION_PER_PIXEL);
        assert_close(y, MODEL_INITIAL_ROTATION_Y + 10.0 * ROTATION_PER_PIXEL);

        session.pointer_up();
        assert_eq!(session.pointer_move(Vec2::new(200.0, 200.0)), None);
        assert_eq!(rotation(&session), (x, y));
    }

    #[test]
    fn accumulated_rotation_is_sum_of_deltas() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);

        let path = [
            Vec2::new(12.0, 40.0),
            Vec2::new(30.0, 22.0),
            Vec2::new(-4.0, 60.0),
            Vec2::new(90.0, 61.0),
            Vec2::new(90.0, 10.0),
        ];
        let start = Vec2::new(20.0, 20.0);

        session.pointer_down(start);
        for point in path {
            session.pointer_move(point);
        }
        session.pointer_up();

        let total = path[path.len() - 1] - start;
        let (x, y) = rotation(&session);
        assert_close(x, total.y * ROTATION_PER_PIXEL);
        assert_close(y, MODEL_INITIAL_ROTATION_Y + total.x * ROTATION_PER_PIXEL);
    }

    #[test]
    fn pointer_leave_ends_drag() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);

        session.pointer_down(Vec2::ZERO);
        session.pointer_leave();

        assert!(!session.drag().is_dragging());
        assert_eq!(session.pointer_move(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn drag_before_load_tracks_pointer_without_rotating() {
        let mut session = ViewerSession::default();
        let ticket = session.open(surface()).ticket;

        session.pointer_down(Vec2::new(0.0, 0.0));
        assert_eq!(session.pointer_move(Vec2::new(10.0, 10.0)), None);
        assert_eq!(session.drag().last_pointer(), Vec2::new(10.0, 10.0));

        session.complete_load(ticket, Ok(model()));
        session.pointer_move(Vec2::new(20.0, 10.0));

        let (x, y) = rotation(&session);
        assert_close(x, 0.0);
        assert_close(y, MODEL_INITIAL_ROTATION_Y + 10.0 * ROTATION_PER_PIXEL);
    }

    #[test]
    fn pointer_events_on_closed_session_are_ignored() {
        let mut session = ViewerSession::default();
        session.pointer_down(Vec2::new(3.0, 4.0));

        assert!(!session.drag().is_dragging());
        assert_eq!(session.pointer_move(Vec2::new(9.0, 9.0)), None);
    }

    #[test]
    fn close_without_open_is_a_no_op() {
        let mut session = ViewerSession::default();
        assert_eq!(session.close(), None);
        assert_eq!(session.close(), None);
        assert!(!session.is_active());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn close_releases_surface_and_resets_state() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);
        session.pointer_down(Vec2::new(1.0, 1.0));

        assert_eq!(session.close(), Some(surface()));
        assert!(!session.is_active());
        assert!(!session.render_loop().is_running());
        assert!(session.rendered_object().is_none());
        assert_eq!(*session.drag(), DragState::default());
        assert_eq!(session.surface(), None);
    }

    #[test]
    fn reopen_starts_fresh() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);
        session.pointer_down(Vec2::ZERO);
        session.pointer_move(Vec2::new(50.0, 50.0));
        session.close();

        let ticket = session.open(surface()).ticket;
        assert!(session.rendered_object().is_none());
        assert!(!session.drag().is_dragging());

        session.complete_load(ticket, Ok(model()));
        let (x, y) = rotation(&session);
        assert_close(x, 0.0);
        assert_close(y, MODEL_INITIAL_ROTATION_Y);
    }

    #[test]
    fn late_load_after_close_is_discarded() {
        let mut session = ViewerSession::default();
        let ticket = session.open(surface()).ticket;
        session.close();

        assert_eq!(session.complete_load(ticket, Ok(model())), LoadOutcome::Stale);
        assert!(session.rendered_object().is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn late_load_from_previous_generation_is_discarded() {
        let mut session = ViewerSession::default();
        let first = session.open(surface()).ticket;
        session.close();
        let second = session.open(Entity::from_raw(7)).ticket;

        assert!(!session.is_current(first));
        assert_eq!(session.complete_load(first, Ok(model())), LoadOutcome::Stale);
        assert!(session.rendered_object().is_none());

        assert_eq!(session.complete_load(second, Ok(model())), LoadOutcome::Applied);
    }

    #[test]
    fn open_while_active_replaces_previous_surface() {
        let mut session = ViewerSession::default();
        let first = session.open(surface());
        assert_eq!(first.replaced_surface, None);

        let second = session.open(Entity::from_raw(9));
        assert_eq!(second.replaced_surface, Some(surface()));
        assert_eq!(session.surface(), Some(Entity::from_raw(9)));
        assert!(!session.is_current(first.ticket));
    }

    #[test]
    fn load_failure_keeps_session_open() {
        let mut session = ViewerSession::default();
        let ticket = session.open(surface()).ticket;
        let err = ViewerError::AssetLoad {
            path: "tree.glb".to_string(),
            reason: "not found".to_string(),
        };

        assert_eq!(
            session.complete_load(ticket, Err(err.clone())),
            LoadOutcome::Failed(err.clone())
        );
        assert!(session.is_active());
        assert!(session.render_loop().is_running());
        assert!(session.rendered_object().is_none());
        assert_eq!(session.load_error(), Some(&err));
    }

    #[test]
    fn rendered_object_transform_uses_fixed_placement() {
        let mut session = ViewerSession::default();
        open_with_model(&mut session);

        let transform = session.rendered_object().map(RenderedObject::transform);
        let transform = transform.expect("model loaded");
        assert_eq!(transform.translation, MODEL_POSITION);
        assert_eq!(transform.scale, Vec3::splat(MODEL_SCALE));
        assert!(
            transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_y(MODEL_INITIAL_ROTATION_Y), 1e-5)
        );
    }
}
