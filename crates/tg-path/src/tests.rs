//! Unit tests for tg-path.
//!
//! All tests use hand-drawn ASCII maps.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use tg_core::{AgentId, GraphSelector, Tick, TileCoord, WorldPos, tile_to_world};
    use tg_terrain::TerrainIndex;

    use crate::{AStarConfig, GridPlanner, PathRequest, PathTicket};

    pub fn planner(map: &str, latency_ticks: u64) -> GridPlanner {
        let terrain = Arc::new(TerrainIndex::from_ascii(map).unwrap());
        GridPlanner::new(terrain, AStarConfig { latency_ticks, ..AStarConfig::default() })
    }

    pub fn ticket(agent: u32, generation: u64) -> PathTicket {
        PathTicket { agent: AgentId(agent), generation }
    }

    pub fn center(x: i32, y: i32) -> WorldPos {
        tile_to_world(TileCoord::new(x, y))
    }

    pub fn request(t: PathTicket, from: (i32, i32), to: (i32, i32), issued_at: u64) -> PathRequest {
        PathRequest {
            ticket: t,
            from: center(from.0, from.1),
            to: center(to.0, to.1),
            graph: GraphSelector::Diagonal,
            issued_at: Tick(issued_at),
        }
    }
}

// ── A* search ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use tg_core::{GraphSelector, TileCoord};

    use super::helpers::planner;
    use crate::PathError;

    fn t(x: i32, y: i32) -> TileCoord {
        TileCoord::new(x, y)
    }

    #[test]
    fn straight_corridor() {
        let p = planner(".....", 0);
        let path = p.find_path(t(0, 0), t(4, 0), GraphSelector::Diagonal).unwrap();
        assert_eq!(path, vec![t(0, 0), t(1, 0), t(2, 0), t(3, 0), t(4, 0)]);
    }

    #[test]
    fn trivial_route_is_start_only() {
        let p = planner("..", 0);
        assert_eq!(p.find_path(t(1, 0), t(1, 0), GraphSelector::Diagonal).unwrap(), vec![t(1, 0)]);
    }

    #[test]
    fn open_field_uses_diagonal() {
        let p = planner("...\n...\n...", 0);
        let path = p.find_path(t(0, 0), t(2, 2), GraphSelector::Diagonal).unwrap();
        assert_eq!(path, vec![t(0, 0), t(1, 1), t(2, 2)]);
    }

    #[test]
    fn orthogonal_graph_has_no_diagonal_steps() {
        let p = planner("...\n...\n...", 0);
        let path = p.find_path(t(0, 0), t(2, 2), GraphSelector::Orthogonal).unwrap();
        assert_eq!(path.len(), 5);
        for w in path.windows(2) {
            assert!(!w[0].is_diagonal_to(w[1]), "diagonal step {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn diagonal_does_not_clip_wall_corner() {
        let p = planner(
            ".#\n\
             ..",
            0,
        );
        let path = p.find_path(t(0, 0), t(1, 1), GraphSelector::Diagonal).unwrap();
        assert_eq!(path, vec![t(0, 0), t(0, 1), t(1, 1)]);
    }

    #[test]
    fn detours_around_wall() {
        let p = planner(
            ".#.\n\
             .#.\n\
             ...",
            0,
        );
        let path = p.find_path(t(0, 0), t(2, 0), GraphSelector::Orthogonal).unwrap();
        assert_eq!(path.first(), Some(&t(0, 0)));
        assert_eq!(path.last(), Some(&t(2, 0)));
        assert!(!path.contains(&t(1, 0)) && !path.contains(&t(1, 1)));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn prefers_cheap_terrain() {
        // Straight through the water costs 2 per tile; the dry detour is longer
        // in steps but cheaper overall.
        let p = planner(
            ".~~~.\n\
             .....",
            0,
        );
        let path = p.find_path(t(0, 0), t(4, 0), GraphSelector::Orthogonal).unwrap();
        assert!(!path.contains(&t(2, 0)));
    }

    #[test]
    fn unwalkable_goal_errors() {
        let p = planner("..#", 0);
        let err = p.find_path(t(0, 0), t(2, 0), GraphSelector::Diagonal).unwrap_err();
        assert_eq!(err, PathError::Unwalkable(t(2, 0)));
        let err = p.find_path(t(0, 0), t(9, 9), GraphSelector::Diagonal).unwrap_err();
        assert_eq!(err, PathError::Unwalkable(t(9, 9)));
    }

    #[test]
    fn disconnected_errors() {
        let p = planner(".#.", 0);
        let err = p.find_path(t(0, 0), t(2, 0), GraphSelector::Diagonal).unwrap_err();
        assert_eq!(err, PathError::NoRoute { from: t(0, 0), to: t(2, 0) });
    }
}

// ── Asynchronous delivery ─────────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use tg_core::{Tick, WorldPos};

    use super::helpers::{center, planner, request, ticket};
    use crate::{PathError, PathPlanner};

    #[test]
    fn result_held_until_latency_elapses() {
        let mut p = planner("....", 2);
        p.request_path(request(ticket(0, 1), (0, 0), (3, 0), 5));

        assert!(p.poll_completed(Tick(5)).is_empty());
        assert!(p.poll_completed(Tick(6)).is_empty());
        let done = p.poll_completed(Tick(7));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, ticket(0, 1));
        let waypoints = done[0].result.as_ref().unwrap();
        assert_eq!(waypoints.first(), Some(&center(0, 0)));
        assert_eq!(waypoints.last(), Some(&center(3, 0)));
        assert_eq!(p.pending(), 0);
    }

    #[test]
    fn late_poll_still_delivers() {
        let mut p = planner("..", 1);
        p.request_path(request(ticket(0, 1), (0, 0), (1, 0), 0));
        assert_eq!(p.poll_completed(Tick(50)).len(), 1);
    }

    #[test]
    fn cancelled_ticket_never_completes() {
        let mut p = planner("...", 3);
        p.request_path(request(ticket(0, 1), (0, 0), (2, 0), 0));
        p.request_path(request(ticket(0, 2), (0, 0), (1, 0), 0));
        p.cancel(ticket(0, 1));

        let done = p.poll_completed(Tick(10));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, ticket(0, 2));
    }

    #[test]
    fn failure_is_delivered_not_dropped() {
        let mut p = planner(".#.", 0);
        p.request_path(request(ticket(3, 9), (0, 0), (2, 0), 0));
        let done = p.poll_completed(Tick(0));
        assert!(matches!(done[0].result, Err(PathError::NoRoute { .. })));
    }

    #[test]
    fn invalid_world_position_is_reported() {
        let mut p = planner("..", 0);
        let mut req = request(ticket(0, 1), (0, 0), (1, 0), 0);
        req.to = WorldPos::new(f64::NAN, 0.5);
        p.request_path(req);
        let done = p.poll_completed(Tick(0));
        assert!(matches!(done[0].result, Err(PathError::Core(_))));
    }
}

// ── CompletionQueue ───────────────────────────────────────────────────────────

#[cfg(test)]
mod completion_queue {
    use tg_core::Tick;

    use super::helpers::ticket;
    use crate::{CompletionQueue, PathCompletion, PathError};

    fn done(agent: u32, generation: u64) -> PathCompletion {
        PathCompletion { ticket: ticket(agent, generation), result: Err(PathError::Empty) }
    }

    #[test]
    fn drains_in_tick_then_submission_order() {
        let mut q = CompletionQueue::new();
        q.push(Tick(3), done(0, 1));
        q.push(Tick(1), done(1, 1));
        q.push(Tick(3), done(2, 1));
        q.push(Tick(9), done(3, 1));
        assert_eq!(q.len(), 4);
        assert!(q.drain_due(Tick(0)).is_empty());

        let out: Vec<u32> = q.drain_due(Tick(3)).iter().map(|c| c.ticket.agent.0).collect();
        assert_eq!(out, vec![1, 0, 2]);
        assert_eq!(q.len(), 1);
        assert!(q.drain_due(Tick(8)).is_empty());
    }

    #[test]
    fn cancel_removes_only_matching() {
        let mut q = CompletionQueue::new();
        q.push(Tick(2), done(0, 1));
        q.push(Tick(2), done(0, 2));
        assert!(q.cancel(ticket(0, 1)));
        assert!(!q.cancel(ticket(0, 1)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(Tick(2))[0].ticket, ticket(0, 2));
        assert!(q.is_empty());
    }
}

// ── ManualPlanner ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod manual {
    use tg_core::Tick;

    use super::helpers::{center, request, ticket};
    use crate::{ManualPlanner, PathPlanner};

    #[test]
    fn records_and_completes_on_demand() {
        let mut p = ManualPlanner::new();
        p.request_path(request(ticket(0, 1), (0, 0), (2, 0), 0));
        assert_eq!(p.requests.len(), 1);
        assert!(p.poll_completed(Tick(100)).is_empty());

        p.complete(ticket(0, 1), Ok(vec![center(0, 0), center(1, 0)]));
        assert_eq!(p.poll_completed(Tick(100)).len(), 1);
        assert!(p.poll_completed(Tick(101)).is_empty());
    }
}
