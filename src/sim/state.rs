//! Field state and layouts
//!
//! A `Field` owns every object in the arena, the scoreboard and the seeded
//! RNG used for serves. Objects are kept sorted by id so iteration order is
//! stable across runs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::object::{GameObject, ObjectId, ObjectKind};
use super::tick::Command;
use super::vector::{Point, Vector};
use crate::error::{EngineError, ensure_finite};
use crate::scoreboard::{GoalOutcome, Scoreboard, Side};
use crate::settings::Settings;

/// Something the external layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Two objects touched and were resolved this tick
    Collision { a: ObjectId, b: ObjectId },
    /// A puck entered a goal
    Goal { scorer: Side },
    /// A side reached the winning score
    MatchWon { winner: Side },
    /// Objects were laid out again and the puck served
    RoundReset { round: u32, serve_toward: Side },
}

/// Arena with its objects, score and serve RNG
#[derive(Debug, Clone)]
pub struct Field {
    pub settings: Settings,
    /// Live objects, sorted by id
    pub objects: Vec<GameObject>,
    pub scoreboard: Scoreboard,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rounds played, starting at 0
    pub round: u32,
    /// Layout restored at each round reset
    template: Vec<GameObject>,
    /// Commands queued for the start of the next tick
    pub(crate) pending: Vec<Command>,
    rng: Pcg32,
}

impl Field {
    /// Build a field from arbitrary objects; ids must be unique.
    ///
    /// Velocities are kept as given; the puck is only served on round resets.
    pub fn new(settings: Settings, mut objects: Vec<GameObject>) -> Result<Self, EngineError> {
        settings.validate()?;
        objects.sort_by_key(|o| o.id);
        if let Some(pair) = objects.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(EngineError::InvalidSettings(format!(
                "duplicate object id {}",
                pair[0].id
            )));
        }

        let field = Self {
            scoreboard: Scoreboard::new(settings.max_score),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            template: objects.clone(),
            objects,
            time_ticks: 0,
            round: 0,
            pending: Vec::new(),
        };
        log::info!(
            "Field ready: {} objects, {}x{}",
            field.objects.len(),
            field.settings.field_width,
            field.settings.field_height
        );
        Ok(field)
    }

    /// Two-player table: goals at both ends, a divider between the halves
    pub fn standard(settings: Settings) -> Result<Self, EngineError> {
        let objects = standard_layout(&settings)?;
        let mut field = Self::new(settings, objects)?;
        field.serve(None);
        Ok(field)
    }

    /// Single-player table: closed walls and a computer racket
    pub fn practice(settings: Settings) -> Result<Self, EngineError> {
        let objects = practice_layout(&settings)?;
        let mut field = Self::new(settings, objects)?;
        field.serve(None);
        Ok(field)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.index_of(id).map(|i| &self.objects[i])
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.index_of(id).map(move |i| &mut self.objects[i])
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.binary_search_by_key(&id, |o| o.id).ok()
    }

    /// First puck on the field
    pub fn puck_id(&self) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|o| o.kind == ObjectKind::Puck)
            .map(|o| o.id)
    }

    /// Mallets in id order
    pub fn mallet_ids(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| o.kind == ObjectKind::Mallet)
            .map(|o| o.id)
            .collect()
    }

    /// Queue a command for the start of the next tick
    pub fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Apply one command to its object.
    ///
    /// Non-finite vectors and non-positive damping are rejected and leave the
    /// object untouched.
    pub fn apply_command(&mut self, command: &Command) -> Result<(), EngineError> {
        let mallet_acceleration = self.settings.mallet_acceleration;
        let id = command.target();
        let object = self.object_mut(id).ok_or(EngineError::UnknownObject(id))?;
        if object.is_static() {
            return Err(EngineError::StaticObject(id));
        }

        match *command {
            Command::Accelerate { direction, .. } => {
                let acceleration = direction * mallet_acceleration;
                if !acceleration.is_finite() {
                    return Err(EngineError::NonFinite("command direction"));
                }
                object.accelerate(acceleration);
            }
            Command::Steer {
                acceleration,
                damping,
                ..
            } => {
                if !acceleration.is_finite() {
                    return Err(EngineError::NonFinite("command acceleration"));
                }
                ensure_finite(damping, "command damping")?;
                if damping <= 0.0 {
                    return Err(EngineError::InvalidMoveContext(format!(
                        "damping must be positive, got {damping}"
                    )));
                }
                object.accelerate(acceleration);
                object.move_ctx.damping = damping;
            }
        }
        Ok(())
    }

    /// Credit a goal against `owner`, then start a new round served toward them
    pub fn score_goal(&mut self, owner: Side) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.scoreboard.record_goal(owner) {
            GoalOutcome::Scored { scorer } => {
                log::info!(
                    "Goal for {} ({}:{})",
                    scorer.as_str(),
                    self.scoreboard.left,
                    self.scoreboard.right
                );
                events.push(GameEvent::Goal { scorer });
            }
            GoalOutcome::MatchWon { winner } => {
                log::info!(
                    "Match won by {} ({} matches)",
                    winner.as_str(),
                    self.scoreboard.matches_won(winner)
                );
                events.push(GameEvent::Goal { scorer: winner });
                events.push(GameEvent::MatchWon { winner });
            }
        }

        self.reset_round(owner);
        events.push(GameEvent::RoundReset {
            round: self.round,
            serve_toward: owner,
        });
        events
    }

    /// Restore the initial layout and serve toward `toward`
    pub fn reset_round(&mut self, toward: Side) {
        self.objects = self.template.clone();
        self.pending.clear();
        self.round += 1;
        self.serve(Some(toward));
        log::info!("Round {} started, serving {}", self.round, toward.as_str());
    }

    /// Give the puck its serve velocity.
    ///
    /// The opening serve is fixed; later serves head toward the side that
    /// conceded with a seeded vertical jitter.
    fn serve(&mut self, toward: Option<Side>) {
        let speed = self.settings.serve_speed;
        let velocity = match toward {
            None => Vector::new(speed, 1.0),
            Some(side) => {
                let jitter = self.rng.random_range(-1.0f32..=1.0);
                let vx = match side {
                    Side::Left => -speed,
                    Side::Right => speed,
                };
                Vector::new(vx, jitter)
            }
        };

        if let Some(id) = self.puck_id() {
            if let Some(puck) = self.object_mut(id) {
                puck.velocity = velocity;
            }
        }
    }
}

/// Sequential ids in construction order
struct IdGen(u32);

impl IdGen {
    fn fresh(&mut self) -> ObjectId {
        self.0 += 1;
        ObjectId(self.0)
    }
}

fn standard_layout(settings: &Settings) -> Result<Vec<GameObject>, EngineError> {
    let (w, h) = (settings.field_width, settings.field_height);
    let mut ids = IdGen(0);
    let mallet_ctx = settings.mallet_move_context();

    Ok(vec![
        GameObject::puck(
            ids.fresh(),
            Point::new(w / 3.0, h / 3.0),
            settings.puck_radius(),
            Vector::ZERO,
            settings.puck_move_context(),
        )?,
        GameObject::mallet(
            ids.fresh(),
            Point::new(w / 3.0, h / 2.0),
            settings.mallet_radius(),
            mallet_ctx,
            settings.mallet_weight,
        )?,
        GameObject::mallet(
            ids.fresh(),
            Point::new(2.0 * w / 3.0, h / 2.0),
            settings.mallet_radius(),
            mallet_ctx,
            settings.mallet_weight,
        )?,
        GameObject::wall(ids.fresh(), Point::new(0.0, 0.0), Point::new(w, 0.0))?,
        GameObject::wall(ids.fresh(), Point::new(w, h), Point::new(0.0, h))?,
        GameObject::goal(ids.fresh(), Point::new(0.0, h), Point::new(0.0, 0.0), Side::Left)?,
        GameObject::goal(ids.fresh(), Point::new(w, 0.0), Point::new(w, h), Side::Right)?,
        GameObject::divider(ids.fresh(), Point::new(w / 2.0, 0.0), Point::new(w / 2.0, h))?,
    ])
}

fn practice_layout(settings: &Settings) -> Result<Vec<GameObject>, EngineError> {
    let (w, h) = (settings.field_width, settings.field_height);
    let mut ids = IdGen(0);
    let puck_id = ids.fresh();
    let racket_x = w - w / 3.0;

    Ok(vec![
        GameObject::puck(
            puck_id,
            Point::new(w / 3.0, h / 3.0),
            settings.puck_radius(),
            Vector::ZERO,
            settings.puck_move_context(),
        )?,
        GameObject::mallet(
            ids.fresh(),
            Point::new(w / 3.0, h / 2.0),
            settings.mallet_radius(),
            settings.mallet_move_context(),
            settings.mallet_weight,
        )?,
        GameObject::wall(ids.fresh(), Point::new(0.0, 0.0), Point::new(w, 0.0))?,
        GameObject::wall(ids.fresh(), Point::new(w, 0.0), Point::new(w, h))?,
        GameObject::wall(ids.fresh(), Point::new(w, h), Point::new(0.0, h))?,
        GameObject::wall(ids.fresh(), Point::new(0.0, h), Point::new(0.0, 0.0))?,
        GameObject::racket(
            ids.fresh(),
            Point::new(racket_x, h / 4.0),
            Point::new(racket_x, 3.0 * h / 4.0),
            puck_id,
            settings.racket_move_context(),
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let field = Field::standard(Settings::default()).unwrap();
        assert_eq!(field.objects.len(), 8);
        assert_eq!(field.mallet_ids(), vec![ObjectId(2), ObjectId(3)]);

        let puck = field.object(field.puck_id().unwrap()).unwrap();
        assert_eq!(puck.position(), Point::new(1000.0 / 3.0, 200.0));
        assert_eq!(puck.velocity, Vector::new(15.0, 1.0));

        let goals: Vec<_> = field
            .objects
            .iter()
            .filter_map(|o| match o.kind {
                ObjectKind::Goal { owner } => Some((owner, o.position().x())),
                _ => None,
            })
            .collect();
        assert_eq!(goals, vec![(Side::Left, 0.0), (Side::Right, 1000.0)]);
    }

    #[test]
    fn test_layout_starts_without_overlaps() {
        for field in [
            Field::standard(Settings::default()).unwrap(),
            Field::practice(Settings::default()).unwrap(),
        ] {
            for (i, a) in field.objects.iter().enumerate() {
                for b in &field.objects[i + 1..] {
                    if a.can_collide_with(b) {
                        assert!(
                            a.collision_info(b).is_none(),
                            "{} and {} overlap",
                            a.kind.name(),
                            b.kind.name()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_practice_racket_targets_puck() {
        let field = Field::practice(Settings::default()).unwrap();
        let puck = field.puck_id().unwrap();
        let racket = field
            .objects
            .iter()
            .find(|o| matches!(o.kind, ObjectKind::Racket { .. }))
            .unwrap();
        assert_eq!(racket.kind, ObjectKind::Racket { target: puck });
        let seg = racket.shape.as_segment().unwrap();
        assert!((seg.length() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let wall = |id| GameObject::wall(ObjectId(id), Point::ORIGIN, Point::new(1.0, 0.0));
        let objects = vec![wall(1).unwrap(), wall(1).unwrap()];
        assert!(matches!(
            Field::new(Settings::default(), objects),
            Err(EngineError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_objects_sorted_by_id() {
        let wall = |id| GameObject::wall(ObjectId(id), Point::ORIGIN, Point::new(1.0, 0.0));
        let objects = vec![wall(9).unwrap(), wall(2).unwrap(), wall(5).unwrap()];
        let field = Field::new(Settings::default(), objects).unwrap();
        let ids: Vec<u32> = field.objects.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert!(field.object(ObjectId(5)).is_some());
        assert!(field.object(ObjectId(4)).is_none());
    }

    #[test]
    fn test_apply_command_errors() {
        let mut field = Field::standard(Settings::default()).unwrap();
        let unknown = Command::Accelerate {
            id: ObjectId(99),
            direction: Vector::new(1.0, 0.0),
        };
        assert!(matches!(
            field.apply_command(&unknown),
            Err(EngineError::UnknownObject(ObjectId(99)))
        ));
        let wall = Command::Accelerate {
            id: ObjectId(4),
            direction: Vector::new(1.0, 0.0),
        };
        assert!(matches!(field.apply_command(&wall), Err(EngineError::StaticObject(_))));
    }

    #[test]
    fn test_accelerate_scales_direction() {
        let mut field = Field::standard(Settings::default()).unwrap();
        let id = field.mallet_ids()[0];
        field
            .apply_command(&Command::Accelerate {
                id,
                direction: Vector::new(0.0, -1.0),
            })
            .unwrap();
        let mallet = field.object(id).unwrap();
        assert_eq!(mallet.move_ctx.acceleration, Vector::new(0.0, -2.0));
    }

    #[test]
    fn test_non_finite_commands_rejected() {
        let mut field = Field::standard(Settings::default()).unwrap();
        let id = field.mallet_ids()[0];
        let rejected = [
            Command::Accelerate {
                id,
                direction: Vector::new(f32::NAN, 0.0),
            },
            Command::Accelerate {
                id,
                direction: Vector::new(0.0, f32::INFINITY),
            },
            Command::Steer {
                id,
                acceleration: Vector::new(f32::NEG_INFINITY, 0.0),
                damping: 1.0,
            },
            Command::Steer {
                id,
                acceleration: Vector::ZERO,
                damping: f32::NAN,
            },
            Command::Steer {
                id,
                acceleration: Vector::ZERO,
                damping: 0.0,
            },
        ];
        for command in &rejected {
            assert!(field.apply_command(command).is_err(), "{command:?}");
        }

        let mallet = field.object(id).unwrap();
        assert_eq!(mallet.move_ctx.acceleration, Vector::ZERO);
        assert_eq!(mallet.move_ctx.damping, Settings::default().mallet_move_context().damping);
    }

    #[test]
    fn test_score_goal_resets_round() {
        let mut field = Field::standard(Settings::default()).unwrap();
        let puck_id = field.puck_id().unwrap();
        if let Some(puck) = field.object_mut(puck_id) {
            puck.shape.translate(Vector::new(100.0, 100.0));
        }

        let events = field.score_goal(Side::Right);
        assert_eq!(
            events,
            vec![
                GameEvent::Goal { scorer: Side::Left },
                GameEvent::RoundReset {
                    round: 1,
                    serve_toward: Side::Right
                },
            ]
        );
        assert_eq!(field.scoreboard.left, 1);

        let puck = field.object(puck_id).unwrap();
        assert_eq!(puck.position(), Point::new(1000.0 / 3.0, 200.0));
        assert!(puck.velocity.x() > 0.0);
        assert!(puck.velocity.y().abs() <= 1.0);
        assert_eq!(puck.shape.history_len(), 0);
    }

    #[test]
    fn test_serves_are_seeded() {
        let serve_of = |seed: u64| {
            let settings = Settings {
                seed,
                ..Settings::default()
            };
            let mut field = Field::standard(settings).unwrap();
            field.score_goal(Side::Left);
            field.object(field.puck_id().unwrap()).unwrap().velocity
        };
        assert_eq!(serve_of(7), serve_of(7));
        assert!(serve_of(7).x() < 0.0);
    }
}
