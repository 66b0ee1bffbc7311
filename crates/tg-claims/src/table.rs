//! The `ClaimTable`: authoritative occupancy and reservation maps.

use tg_core::{AgentId, TileCoord};

use crate::{Claim, ClaimKind};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

// ── Ledger ────────────────────────────────────────────────────────────────────

/// One claim kind: `tile → agent` plus the reverse `agent → tile` index.
///
/// The two maps always mirror each other, which is what keeps "one claim of
/// each kind per tile" and "one claim of each kind per agent" true at once.
#[derive(Clone, Debug, Default)]
struct Ledger {
    by_tile:  Map<TileCoord, AgentId>,
    by_agent: Map<AgentId, TileCoord>,
}

impl Ledger {
    #[inline]
    fn owner(&self, tile: TileCoord) -> Option<AgentId> {
        self.by_tile.get(&tile).copied()
    }

    #[inline]
    fn tile_of(&self, agent: AgentId) -> Option<TileCoord> {
        self.by_agent.get(&agent).copied()
    }

    /// Point `tile` at `agent`.  Drops the agent's previous tile of this kind
    /// and returns any *other* agent whose claim was displaced.
    fn set(&mut self, tile: TileCoord, agent: AgentId) -> Option<AgentId> {
        if let Some(prev) = self.by_agent.insert(agent, tile) {
            if prev != tile {
                self.by_tile.remove(&prev);
            }
        }
        match self.by_tile.insert(tile, agent) {
            Some(other) if other != agent => {
                self.by_agent.remove(&other);
                Some(other)
            }
            _ => None,
        }
    }

    fn remove_if_owned_by(&mut self, tile: TileCoord, agent: AgentId) -> bool {
        if self.owner(tile) != Some(agent) {
            return false;
        }
        self.by_tile.remove(&tile);
        self.by_agent.remove(&agent);
        true
    }

    fn remove_agent(&mut self, agent: AgentId) -> Option<TileCoord> {
        let tile = self.by_agent.remove(&agent)?;
        self.by_tile.remove(&tile);
        Some(tile)
    }

    fn is_consistent(&self) -> bool {
        self.by_tile.len() == self.by_agent.len()
            && self.by_agent.iter().all(|(a, t)| self.by_tile.get(t) == Some(a))
    }
}

// ── ClaimTable ────────────────────────────────────────────────────────────────

/// Process-wide record of which agent occupies or has reserved each tile.
///
/// One table exists per simulation world and is passed by reference to every
/// agent controller; independent worlds (and tests) never share claims.
///
/// None of the mutating calls arbitrate: `reserve` and `occupy` overwrite.
/// Callers check [`can_reserve`](Self::can_reserve) first, within the same
/// uninterrupted agent update.  The `*_if_owned_by` calls are no-ops when the
/// caller does not own the claim, so stale agent state can never clear
/// another agent's entry.
#[derive(Clone, Debug, Default)]
pub struct ClaimTable {
    occupied: Ledger,
    reserved: Ledger,
}

impl ClaimTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Arbitration queries ───────────────────────────────────────────────

    /// `true` iff `tile` is neither occupied nor reserved by an agent other
    /// than `agent`.  Re-claiming a tile the agent already holds is allowed.
    pub fn can_reserve(&self, tile: TileCoord, agent: AgentId) -> bool {
        self.occupied.owner(tile).is_none_or(|o| o == agent)
            && self.reserved.owner(tile).is_none_or(|r| r == agent)
    }

    /// `true` when a diagonal step `from → to` would squeeze between the two
    /// orthogonal corner tiles and either of them is occupied or reserved by
    /// anyone.  Orthogonal steps are never blocked by this rule.
    pub fn is_diagonal_move_blocked(&self, from: TileCoord, to: TileCoord) -> bool {
        if !from.is_diagonal_to(to) {
            return false;
        }
        from.corners_toward(to).into_iter().any(|c| self.is_claimed(c))
    }

    /// `true` if `tile` has any claim at all.
    #[inline]
    pub fn is_claimed(&self, tile: TileCoord) -> bool {
        self.occupied.owner(tile).is_some() || self.reserved.owner(tile).is_some()
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Set the Reserved claim on `tile` to `agent`.
    ///
    /// Performs no arbitration; check [`can_reserve`](Self::can_reserve)
    /// first.  Reserving twice is idempotent.  An agent's earlier reservation
    /// on a different tile is dropped so it never holds two.
    pub fn reserve(&mut self, tile: TileCoord, agent: AgentId) {
        if let Some(other) = self.reserved.set(tile, agent) {
            tracing::warn!(%tile, %agent, displaced = %other, "reservation overwrote another agent's claim");
        }
    }

    /// `can_reserve` + `reserve` as one call.  Returns whether the tile was
    /// reserved.
    pub fn try_reserve(&mut self, tile: TileCoord, agent: AgentId) -> bool {
        if !self.can_reserve(tile, agent) {
            return false;
        }
        self.reserve(tile, agent);
        true
    }

    /// Set the Occupied claim on `tile` to `agent`, dropping any other tile
    /// the agent occupied.
    pub fn occupy(&mut self, tile: TileCoord, agent: AgentId) {
        if let Some(other) = self.occupied.set(tile, agent) {
            tracing::warn!(%tile, %agent, displaced = %other, "occupation overwrote another agent's claim");
        }
    }

    /// Remove the Occupied claim on `tile` only if `agent` owns it.
    pub fn release_occupation_if_owned_by(&mut self, tile: TileCoord, agent: AgentId) -> bool {
        self.occupied.remove_if_owned_by(tile, agent)
    }

    /// Remove the Reserved claim on `tile` only if `agent` owns it.
    pub fn clear_reservation_if_owned_by(&mut self, tile: TileCoord, agent: AgentId) -> bool {
        self.reserved.remove_if_owned_by(tile, agent)
    }

    /// Remove every Reserved claim owned by `agent`.  Returns how many were
    /// removed.
    pub fn clear_all_reservations_owned_by(&mut self, agent: AgentId) -> usize {
        let mut removed = 0;
        while self.reserved.remove_agent(agent).is_some() {
            removed += 1;
        }
        removed
    }

    /// Arrival protocol for `agent` stepping `from → to`:
    ///
    /// 1. release its Occupied claim on `from`,
    /// 2. clear its own Reserved claim on `to`,
    /// 3. occupy `to`.
    ///
    /// The vacated tile is free before the new one is marked occupied.
    pub fn transfer(&mut self, from: TileCoord, to: TileCoord, agent: AgentId) {
        self.release_occupation_if_owned_by(from, agent);
        self.clear_reservation_if_owned_by(to, agent);
        self.occupy(to, agent);
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn occupant(&self, tile: TileCoord) -> Option<AgentId> {
        self.occupied.owner(tile)
    }

    #[inline]
    pub fn reserver(&self, tile: TileCoord) -> Option<AgentId> {
        self.reserved.owner(tile)
    }

    #[inline]
    pub fn occupied_tile_of(&self, agent: AgentId) -> Option<TileCoord> {
        self.occupied.tile_of(agent)
    }

    #[inline]
    pub fn reserved_tile_of(&self, agent: AgentId) -> Option<TileCoord> {
        self.reserved.tile_of(agent)
    }

    /// Every claim `agent` holds (at most one of each kind).
    pub fn claims_of(&self, agent: AgentId) -> Vec<Claim> {
        let occ = self.occupied.tile_of(agent).map(|tile| Claim { tile, kind: ClaimKind::Occupied, agent });
        let res = self.reserved.tile_of(agent).map(|tile| Claim { tile, kind: ClaimKind::Reserved, agent });
        occ.into_iter().chain(res).collect()
    }

    /// All claims, sorted by `(tile.y, tile.x, kind)` for stable output.
    pub fn claims(&self) -> Vec<Claim> {
        let occ = self.occupied.by_tile.iter().map(|(&tile, &agent)| Claim { tile, kind: ClaimKind::Occupied, agent });
        let res = self.reserved.by_tile.iter().map(|(&tile, &agent)| Claim { tile, kind: ClaimKind::Reserved, agent });
        let mut all: Vec<Claim> = occ.chain(res).collect();
        all.sort_by_key(|c| (c.tile.y, c.tile.x, c.kind));
        all
    }

    /// Iterate [`claims`](Self::claims) in the same order.
    pub fn iter(&self) -> impl Iterator<Item = Claim> {
        self.claims().into_iter()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.by_tile.len()
    }

    pub fn reserved_count(&self) -> usize {
        self.reserved.by_tile.len()
    }

    /// Total number of claims of both kinds.
    pub fn len(&self) -> usize {
        self.occupied_count() + self.reserved_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when the forward and reverse indices agree.  Always holds for
    /// tables mutated only through this API; exposed for invariant tests.
    pub fn is_consistent(&self) -> bool {
        self.occupied.is_consistent() && self.reserved.is_consistent()
    }
}
