//! Fixed timestep simulation tick
//!
//! Advances a `Field` by one step:
//! 1. clear collision flags
//! 2. apply queued and external commands
//! 3. integrate every object in id order
//! 4. one collision pass over every pair
//! 5. queue racket steering for the next tick
//! 6. score goals and reset the round

use super::object::{GameObject, ObjectId, ObjectKind};
use super::state::{Field, GameEvent};
use super::vector::Vector;
use crate::consts::{RACKET_ACCELERATION, RACKET_BRAKE_DAMPING};
use crate::scoreboard::Side;

/// A request to change how an object moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Player input: acceleration becomes `direction * mallet_acceleration`
    Accelerate { id: ObjectId, direction: Vector },
    /// Raw acceleration and damping, used by the racket controller
    Steer {
        id: ObjectId,
        acceleration: Vector,
        damping: f32,
    },
}

impl Command {
    pub fn target(&self) -> ObjectId {
        match *self {
            Command::Accelerate { id, .. } | Command::Steer { id, .. } => id,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn accelerate(id: ObjectId, direction: Vector) -> Self {
        Self {
            commands: vec![Command::Accelerate { id, direction }],
        }
    }
}

/// Advance the field by one fixed timestep
pub fn tick(field: &mut Field, input: &TickInput) -> Vec<GameEvent> {
    field.time_ticks += 1;
    log::trace!("tick {}", field.time_ticks);

    for object in &mut field.objects {
        object.in_collision = false;
    }

    let queued = std::mem::take(&mut field.pending);
    for command in queued.iter().chain(&input.commands) {
        if let Err(e) = field.apply_command(command) {
            log::warn!("Skipping command {:?}: {}", command, e);
        }
    }

    for object in &mut field.objects {
        object.on_tick();
    }

    let mut events = Vec::new();
    let goal = resolve_collisions(&mut field.objects, &mut events);

    steer_rackets(field);

    if let Some(owner) = goal {
        events.extend(field.score_goal(owner));
    }

    events
}

/// Single pass over every pair in id order. Returns the owner of the first
/// goal a puck touched.
fn resolve_collisions(objects: &mut [GameObject], events: &mut Vec<GameEvent>) -> Option<Side> {
    let mut goal = None;

    for i in 0..objects.len() {
        for j in (i + 1)..objects.len() {
            let (head, tail) = objects.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if !a.can_collide_with(b) {
                continue;
            }
            let Some((info_a, info_b)) = a.collision_info(b) else {
                continue;
            };

            // Decided before either side moves or gets flagged
            let a_falls = a.falls_back(b);
            let b_falls = b.falls_back(a);
            a.on_collision(info_a, a_falls);
            b.on_collision(info_b, b_falls);
            a.in_collision = true;
            b.in_collision = true;

            log::debug!(
                "{} {} hit {} {}",
                a.kind.name(),
                a.id,
                b.kind.name(),
                b.id
            );
            events.push(GameEvent::Collision { a: a.id, b: b.id });

            if let (ObjectKind::Puck, ObjectKind::Goal { owner })
            | (ObjectKind::Goal { owner }, ObjectKind::Puck) = (a.kind, b.kind)
            {
                goal = goal.or(Some(owner));
            }
        }
    }

    goal
}

/// Queue next-tick commands for every racket following a puck
fn steer_rackets(field: &mut Field) {
    let commands: Vec<Command> = field
        .objects
        .iter()
        .filter_map(|racket| {
            let ObjectKind::Racket { target } = racket.kind else {
                return None;
            };
            let target = field.object(target)?.position();
            let segment = racket.shape.as_segment()?;
            let center = segment.center();
            let reach = segment.length() / 3.0;

            let tracking = !racket.in_collision && target.x() < center.x();
            let dy = center.y() - target.y();
            let acceleration = if tracking && dy > reach {
                Some(Vector::new(0.0, -RACKET_ACCELERATION))
            } else if tracking && -dy > reach {
                Some(Vector::new(0.0, RACKET_ACCELERATION))
            } else {
                None
            };

            Some(match acceleration {
                Some(acceleration) => Command::Steer {
                    id: racket.id,
                    acceleration,
                    damping: 1.0,
                },
                None => Command::Steer {
                    id: racket.id,
                    acceleration: Vector::ZERO,
                    damping: RACKET_BRAKE_DAMPING,
                },
            })
        })
        .collect();

    for command in commands {
        field.queue(command);
    }
}
