//! Player movement controller
//!
//! A ground/air state machine drives three independent models (horizontal,
//! gravity, jump). Their velocity deltas are summed and applied to the body
//! once per fixed step.

use std::sync::Arc;

use glam::Vec2;
use platformer_core::{Deadline, SimClock};
use platformer_physics::{Body2D, ContactQuery, ContactSide};
use tracing::debug;

use crate::input::{InputAction, InputState};

use super::jump::{self, JumpOutcome};
use super::{
    gravity, horizontal, ControllerProfiles, ControllerState, PhysicState, ProfileKind,
    VelocityIntegrator,
};

type TransitionHandler = fn(&mut PlayerController, PhysicState, &mut Body2D);

/// Invoked in order on every ground/air transition. The jump must be
/// cancelled before a buffered jump can start again.
const TRANSITION_HANDLERS: [TransitionHandler; 4] = [
    PlayerController::select_profile,
    PlayerController::reset_gravity,
    PlayerController::cancel_jump,
    PlayerController::consume_buffered_jump,
];

/// Result of one fixed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// Velocity change added to the body this step
    pub velocity_delta: Vec2,
    /// New physical state, if it changed this step
    pub transition: Option<PhysicState>,
    /// Physical state after the step
    pub state: PhysicState,
    /// Whether a jump started since the previous step
    pub jumped: bool,
}

/// Platformer movement controller for one entity
pub struct PlayerController {
    /// Shared, read-only tuning
    profiles: Arc<ControllerProfiles>,
    /// Mutable simulation state
    state: ControllerState,
    /// Simulated time, advanced once per step
    clock: SimClock,
    /// When a buffered jump request is forgotten
    jump_buffer: Deadline,
    integrator: VelocityIntegrator,
    jumped: bool,
}

impl PlayerController {
    /// Create a controller standing on the ground
    pub fn new(profiles: Arc<ControllerProfiles>) -> Self {
        Self {
            profiles,
            state: ControllerState::default(),
            clock: SimClock::new(),
            jump_buffer: Deadline::default(),
            integrator: VelocityIntegrator::default(),
            jumped: false,
        }
    }

    pub fn profiles(&self) -> &ControllerProfiles {
        &self.profiles
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn physic_state(&self) -> PhysicState {
        self.state.physic_state
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    /// Simulated seconds stepped so far
    pub fn elapsed(&self) -> f64 {
        self.clock.now()
    }

    /// Progress through the current (or last) jump, in [0, 1]
    pub fn jump_ratio(&self) -> f32 {
        jump::jump_ratio(&self.state, &self.profiles.jump)
    }

    /// Set the movement axis; clamped to [-1, 1]
    pub fn set_movement_input(&mut self, axis: f32) {
        self.state.movement_input = if axis.is_nan() {
            0.0
        } else {
            axis.clamp(-1.0, 1.0)
        };
    }

    /// Switch between walking and sprinting. Takes effect at once on the
    /// ground, at the next landing in the air.
    pub fn toggle_sprint(&mut self) {
        self.state.is_sprinting = !self.state.is_sprinting;
        if self.state.is_grounded() {
            self.state.profile = self.grounded_profile();
        }
    }

    /// Flip which way is down
    pub fn reverse_gravity(&mut self) {
        self.state.gravity_reversed = !self.state.gravity_reversed;
        debug!("Gravity reversed: {}", self.state.gravity_reversed);
    }

    /// Request a jump. Jumps that cannot start now are buffered until the
    /// next landing or until the buffer time runs out.
    pub fn start_jump(&mut self, body: &mut Body2D) -> JumpOutcome {
        if !jump::can_launch(&self.state) {
            self.state.jump_buffered = true;
            self.jump_buffer
                .schedule(self.clock.now(), self.profiles.jump.buffer_time);
            debug!("Jump buffered for {}s", self.profiles.jump.buffer_time);
            return JumpOutcome::Buffered;
        }

        jump::launch(&mut self.state, &self.profiles.jump, body);
        self.jumped = true;
        debug!("Jump started at air time {}", self.state.air_time);
        JumpOutcome::Started
    }

    /// Route this frame's actions to the controller
    pub fn apply_input(&mut self, input: &InputState, body: &mut Body2D) -> Option<JumpOutcome> {
        self.set_movement_input(input.movement_axis());
        if input.is_just_pressed(InputAction::Sprint) {
            self.toggle_sprint();
        }
        if input.is_just_pressed(InputAction::ReverseGravity) {
            self.reverse_gravity();
        }
        if input.is_just_pressed(InputAction::Jump) {
            return Some(self.start_jump(body));
        }
        None
    }

    /// Advance the controller by one fixed step and push the resulting
    /// velocity change into `body`
    pub fn step(
        &mut self,
        contacts: &impl ContactQuery,
        body: &mut Body2D,
        dt: f32,
    ) -> StepOutput {
        self.clock.advance(dt);
        if self.jump_buffer.poll(self.clock.now()) {
            self.state.jump_buffered = false;
            debug!("Buffered jump expired");
        }
        self.integrator.begin(body);

        let support_side = ContactSide::support(self.state.gravity_reversed);
        let support = contacts.contact(support_side);
        let transition = self.detect_ground(support.touching, body);

        if !self.state.is_grounded() {
            self.state.air_time += dt;
        }
        gravity::expire_coyote(&mut self.state, &self.profiles.gravity);

        let kind = self.state.profile;
        let movement = horizontal::horizontal_delta(
            &mut self.state,
            self.profiles.movement(kind),
            support,
            body.velocity,
            dt,
        );
        self.integrator.add(movement);

        let fall = gravity::gravity_delta(&mut self.state, &self.profiles.gravity, body.velocity, dt);
        self.integrator.add(fall);

        let opposite = contacts.contact(support_side.opposite());
        let rise = jump::jump_delta(
            &mut self.state,
            &self.profiles.jump,
            opposite,
            body.velocity,
            dt,
        );
        self.integrator.add(rise);

        let velocity_delta = self.integrator.apply(body);
        let jumped = std::mem::take(&mut self.jumped);

        StepOutput {
            velocity_delta,
            transition,
            state: self.state.physic_state,
            jumped,
        }
    }

    /// Call after the body has been moved. If the step pushed the body but it
    /// did not move, drop the horizontal velocity so it stops grinding into
    /// the obstacle. Returns whether the correction was applied.
    pub fn resolve_stuck(&mut self, body: &mut Body2D) -> bool {
        if !self.integrator.is_stuck(body) {
            return false;
        }
        body.velocity.x = 0.0;
        self.state.horizontal_velocity.x = 0.0;
        debug!("Stuck at {:?}, horizontal velocity cleared", body.position);
        true
    }

    fn detect_ground(&mut self, touching: bool, body: &mut Body2D) -> Option<PhysicState> {
        let next = match (self.state.physic_state, touching) {
            (PhysicState::Air, true) => PhysicState::Ground,
            (PhysicState::Ground, false) => {
                if !self.state.is_jumping {
                    self.state.is_in_coyote_time = true;
                }
                PhysicState::Air
            }
            _ => return None,
        };

        self.state.physic_state = next;
        debug!("Physic state changed to {:?}", next);
        for handler in TRANSITION_HANDLERS {
            handler(self, next, body);
        }
        Some(next)
    }

    fn grounded_profile(&self) -> ProfileKind {
        if self.state.is_sprinting {
            ProfileKind::Sprint
        } else {
            ProfileKind::Ground
        }
    }

    fn select_profile(&mut self, next: PhysicState, _body: &mut Body2D) {
        self.state.profile = match next {
            PhysicState::Ground => self.grounded_profile(),
            PhysicState::Air => ProfileKind::Air,
        };
    }

    fn reset_gravity(&mut self, next: PhysicState, body: &mut Body2D) {
        if next == PhysicState::Ground {
            gravity::reset_on_landing(&mut self.state, body);
        }
    }

    fn cancel_jump(&mut self, next: PhysicState, _body: &mut Body2D) {
        if next == PhysicState::Ground {
            jump::cancel(&mut self.state);
        }
    }

    fn consume_buffered_jump(&mut self, next: PhysicState, body: &mut Body2D) {
        if next == PhysicState::Ground && self.state.jump_buffered {
            self.start_jump(body);
            self.state.jump_buffered = false;
            self.jump_buffer.cancel();
        }
    }
}
