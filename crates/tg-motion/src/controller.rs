//! `AgentMotionController`: one agent's reserve → advance → transfer loop.

use tg_claims::ClaimTable;
use tg_core::{AgentId, GraphSelector, Tick, TileCoord, WorldPos, tile_to_world, world_to_tile};
use tg_path::{PathCompletion, PathError, PathPlanner, PathRequest, PathTicket};

use crate::{MotionConfig, MotionError, MotionResult, MotionState, MovementState, ObstacleSensor};

// ── Events ────────────────────────────────────────────────────────────────────

/// What a single [`AgentMotionController::tick`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StepEvent {
    /// No route, or waiting on the planner.
    Idle,
    /// Walked toward the reserved tile without reaching it.
    Advanced,
    /// Reservation on the next tile was denied.
    Blocked { tile: TileCoord, waited_secs: f64 },
    /// Blocked long enough; a new route toward the final tile was requested.
    Replanned(PathTicket),
    /// Reached `tile` and now occupies it.  `finished` when it was the last
    /// tile of the route.
    Arrived { tile: TileCoord, finished: bool },
    /// A hard obstacle appeared on the reserved tile; the route was dropped.
    Aborted(TileCoord),
}

/// How [`AgentMotionController::on_path_complete`] handled a completion.
#[derive(Clone, Debug, PartialEq)]
pub enum CompletionOutcome {
    /// Not the agent's latest request; ignored.
    Stale,
    /// The planner failed or returned nothing usable; the agent is idle.
    Failed(PathError),
    /// A route of `tiles` steps was installed.  Zero means the agent was
    /// already on the goal tile.
    Applied { tiles: usize },
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Per-agent movement state machine.
///
/// The controller owns the agent's route and position; the shared
/// [`ClaimTable`] is passed into every call that changes claims.  All claim
/// writes go through the "owned by" family of table operations, so an agent
/// can never remove another agent's claim.
#[derive(Clone, Debug)]
pub struct AgentMotionController {
    agent:       AgentId,
    config:      MotionConfig,
    position:    WorldPos,
    state:       MotionState,
    block_timer: f64,
    generation:  u64,
    /// Ticket of the newest unanswered path request.
    pending:     Option<PathTicket>,
    torn_down:   bool,
}

impl AgentMotionController {
    /// Place `agent` at the centre of the tile containing `at` and occupy it.
    ///
    /// Fails if the position is not representable or the tile is claimed by
    /// another agent.
    pub fn spawn(
        agent:  AgentId,
        at:     WorldPos,
        config: MotionConfig,
        claims: &mut ClaimTable,
    ) -> MotionResult<Self> {
        let tile = world_to_tile(at)?;
        if !claims.can_reserve(tile, agent) {
            let by = claims.occupant(tile).or(claims.reserver(tile)).unwrap_or(agent);
            return Err(MotionError::SpawnBlocked { tile, by });
        }
        claims.occupy(tile, agent);
        tracing::debug!(%agent, %tile, "agent spawned");

        Ok(Self {
            agent,
            config,
            position:    tile_to_world(tile),
            state:       MotionState::idle_at(tile),
            block_timer: 0.0,
            generation:  0,
            pending:     None,
            torn_down:   false,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[inline]
    pub fn position(&self) -> WorldPos {
        self.position
    }

    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    #[inline]
    pub fn movement(&self) -> MovementState {
        self.state.movement
    }

    #[inline]
    pub fn current_tile(&self) -> TileCoord {
        self.state.current_tile
    }

    #[inline]
    pub fn reserved_tile(&self) -> Option<TileCoord> {
        self.state.reserved_tile
    }

    /// Ticket of the newest path request still awaiting an answer.
    #[inline]
    pub fn pending_ticket(&self) -> Option<PathTicket> {
        self.pending
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seconds spent blocked on the current tile.
    #[inline]
    pub fn block_timer(&self) -> f64 {
        self.block_timer
    }

    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Abandon the current route and ask `planner` for one toward `goal`.
    ///
    /// Drops every reservation the agent holds, steps back to the centre of
    /// the occupied tile, bumps the request generation and cancels the
    /// previous outstanding ticket.  The route graph is
    /// orthogonal when `sensor` reports a hard obstacle near the goal,
    /// diagonal otherwise.  A non-finite or unrepresentable goal is rejected
    /// before any state changes.
    pub fn request_move<P, S>(
        &mut self,
        goal:    WorldPos,
        now:     Tick,
        claims:  &mut ClaimTable,
        sensor:  &S,
        planner: &mut P,
    ) -> MotionResult<PathTicket>
    where
        P: PathPlanner + ?Sized,
        S: ObstacleSensor + ?Sized,
    {
        if self.torn_down {
            return Err(MotionError::TornDown(self.agent));
        }
        world_to_tile(goal)?;
        Ok(self.issue_request(goal, now, claims, sensor, planner))
    }

    fn issue_request<P, S>(
        &mut self,
        goal:    WorldPos,
        now:     Tick,
        claims:  &mut ClaimTable,
        sensor:  &S,
        planner: &mut P,
    ) -> PathTicket
    where
        P: PathPlanner + ?Sized,
        S: ObstacleSensor + ?Sized,
    {
        claims.clear_all_reservations_owned_by(self.agent);
        self.halt();

        let graph = if sensor.overlaps(goal, self.config.obstacle_probe_radius) {
            GraphSelector::Orthogonal
        } else {
            GraphSelector::Diagonal
        };

        self.generation += 1;
        if let Some(old) = self.pending.take() {
            planner.cancel(old);
        }
        let ticket = PathTicket { agent: self.agent, generation: self.generation };
        planner.request_path(PathRequest {
            ticket,
            from: self.position,
            to: goal,
            graph,
            issued_at: now,
        });
        self.pending = Some(ticket);

        tracing::debug!(agent = %self.agent, %ticket, %graph, "path requested");
        ticket
    }

    /// Apply a planner answer.
    ///
    /// Anything but the newest outstanding ticket is discarded.  Waypoints
    /// are mapped to tiles, consecutive duplicates collapse, and a leading
    /// copy of the current tile is dropped.
    pub fn on_path_complete(
        &mut self,
        completion: PathCompletion,
        claims:     &mut ClaimTable,
    ) -> CompletionOutcome {
        if self.torn_down || self.pending != Some(completion.ticket) {
            tracing::debug!(agent = %self.agent, ticket = %completion.ticket, "stale path completion discarded");
            return CompletionOutcome::Stale;
        }
        self.pending = None;

        let tiles = match completion.result.and_then(|w| self.route_tiles(&w)) {
            Ok(tiles) => tiles,
            Err(e) => {
                tracing::warn!(agent = %self.agent, error = %e, "path request failed");
                claims.clear_all_reservations_owned_by(self.agent);
                self.state.reset_route();
                return CompletionOutcome::Failed(e);
            }
        };

        let count = tiles.len();
        self.state.pending_path  = tiles;
        self.state.path_cursor   = 0;
        self.state.reserved_tile = None;
        self.state.movement = if count == 0 {
            MovementState::Idle
        } else {
            MovementState::Reserving
        };
        self.block_timer = 0.0;

        tracing::debug!(agent = %self.agent, tiles = count, "route installed");
        CompletionOutcome::Applied { tiles: count }
    }

    /// Map waypoints to the walkable tile sequence.
    fn route_tiles(&self, waypoints: &[WorldPos]) -> Result<Vec<TileCoord>, PathError> {
        if waypoints.is_empty() {
            return Err(PathError::Empty);
        }
        let mut tiles: Vec<TileCoord> = Vec::with_capacity(waypoints.len());
        for &w in waypoints {
            let tile = world_to_tile(w)?;
            if tiles.last() != Some(&tile) {
                tiles.push(tile);
            }
        }
        if tiles.first() == Some(&self.state.current_tile) {
            tiles.remove(0);
        }
        Ok(tiles)
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the state machine by `dt` simulated seconds.
    pub fn tick<P, S>(
        &mut self,
        dt:      f64,
        now:     Tick,
        claims:  &mut ClaimTable,
        sensor:  &S,
        planner: &mut P,
    ) -> StepEvent
    where
        P: PathPlanner + ?Sized,
        S: ObstacleSensor + ?Sized,
    {
        if self.torn_down {
            return StepEvent::Idle;
        }
        match self.state.movement {
            MovementState::Idle => StepEvent::Idle,
            MovementState::Reserving | MovementState::Blocked => {
                match self.try_reserve_next(dt, now, claims, sensor, planner) {
                    // Walk the rest of the tick once the tile is ours.
                    None => self.advance(dt, claims, sensor),
                    Some(event) => event,
                }
            }
            MovementState::Advancing => self.advance(dt, claims, sensor),
        }
    }

    /// Returns `None` once the next tile is reserved.
    fn try_reserve_next<P, S>(
        &mut self,
        dt:      f64,
        now:     Tick,
        claims:  &mut ClaimTable,
        sensor:  &S,
        planner: &mut P,
    ) -> Option<StepEvent>
    where
        P: PathPlanner + ?Sized,
        S: ObstacleSensor + ?Sized,
    {
        let Some(next) = self.state.next_tile() else {
            self.halt();
            return Some(StepEvent::Idle);
        };
        let current = self.state.current_tile;

        if claims.can_reserve(next, self.agent) && !claims.is_diagonal_move_blocked(current, next) {
            claims.reserve(next, self.agent);
            self.state.reserved_tile = Some(next);
            self.state.movement      = MovementState::Advancing;
            self.block_timer         = 0.0;
            tracing::debug!(agent = %self.agent, tile = %next, "tile reserved");
            return None;
        }

        self.state.movement = MovementState::Blocked;
        self.block_timer += dt;
        if self.block_timer < self.config.block_repath_delay_secs {
            tracing::debug!(agent = %self.agent, tile = %next, waited = self.block_timer, "blocked");
            return Some(StepEvent::Blocked { tile: next, waited_secs: self.block_timer });
        }

        // `next` exists, so the route has a final tile.
        let goal = self.state.final_tile().unwrap_or(next);
        tracing::debug!(agent = %self.agent, %goal, "blocked too long, re-planning");
        let ticket = self.issue_request(tile_to_world(goal), now, claims, sensor, planner);
        Some(StepEvent::Replanned(ticket))
    }

    fn advance<S>(&mut self, dt: f64, claims: &mut ClaimTable, sensor: &S) -> StepEvent
    where
        S: ObstacleSensor + ?Sized,
    {
        let Some(target) = self.state.reserved_tile else {
            // Advancing without a reservation cannot be resumed safely.
            self.halt();
            return StepEvent::Idle;
        };
        let center = tile_to_world(target);

        if sensor.overlaps(center, self.config.obstacle_probe_radius) {
            claims.clear_reservation_if_owned_by(target, self.agent);
            self.halt();
            tracing::warn!(agent = %self.agent, tile = %target, "obstacle on reserved tile, route aborted");
            return StepEvent::Aborted(target);
        }

        self.position = self.position.move_towards(center, self.config.tiles_per_second * dt);
        if self.position.distance(center) > self.config.arrive_eps {
            return StepEvent::Advanced;
        }

        let from = self.state.current_tile;
        claims.transfer(from, target, self.agent);
        self.state.current_tile  = target;
        self.state.reserved_tile = None;
        self.state.path_cursor  += 1;
        self.block_timer         = 0.0;

        let finished = self.state.path_cursor >= self.state.pending_path.len();
        if finished {
            self.position = center;
            self.state.reset_route();
        } else {
            self.state.movement = MovementState::Reserving;
        }
        tracing::debug!(agent = %self.agent, %from, to = %target, finished, "arrived");
        StepEvent::Arrived { tile: target, finished }
    }

    /// Drop the route and stand on the centre of the occupied tile.  Without
    /// a reservation the agent may only overlap the tile it occupies.
    fn halt(&mut self) {
        self.state.reset_route();
        self.block_timer = 0.0;
        self.position    = tile_to_world(self.state.current_tile);
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Drop every claim this agent holds and stop moving.
    ///
    /// Returns the outstanding path ticket, if any, so the host can cancel
    /// it.  Later calls are no-ops that return `None`.
    pub fn teardown(&mut self, claims: &mut ClaimTable) -> Option<PathTicket> {
        if self.torn_down {
            return None;
        }
        claims.clear_all_reservations_owned_by(self.agent);
        claims.release_occupation_if_owned_by(self.state.current_tile, self.agent);
        self.state.reset_route();
        self.block_timer = 0.0;
        self.torn_down   = true;
        tracing::debug!(agent = %self.agent, "agent torn down");
        self.pending.take()
    }
}
