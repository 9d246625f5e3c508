//! Room graph construction: a spanning skeleton grown from room 0, then extra loops.

use log::debug;

use crate::config::{ConnectionStrategy, CorridorConfig, DistanceMetric};
use crate::rng::DungeonRng;
use crate::types::{Cell, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectionKind {
    Skeleton,
    Extra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub kind: ConnectionKind,
}

/// Builds the connection list for `rooms`. With a density below 1.0 the
/// skeleton may stop early and leave rooms unreachable.
pub fn build_connections(
    rooms: &[Rect],
    config: &CorridorConfig,
    rng: &mut DungeonRng,
) -> Vec<Connection> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let mut connections = Vec::with_capacity(rooms.len());
    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        if config.connection_density < 1.0 && !rng.chance(config.connection_density) {
            debug!("skeleton stopped early with {} rooms unreached", pending_room_indices.len());
            break;
        }

        let (connected_index, pending_slot) = match config.strategy {
            ConnectionStrategy::Nearest => nearest_pair(
                rooms,
                &connected_room_indices,
                &pending_room_indices,
                config.metric,
            ),
            ConnectionStrategy::Random => (
                connected_room_indices[rng.index(connected_room_indices.len())],
                rng.index(pending_room_indices.len()),
            ),
        };

        let pending_index = pending_room_indices.remove(pending_slot);
        connections.push(Connection {
            from: connected_index,
            to: pending_index,
            kind: ConnectionKind::Skeleton,
        });
        connected_room_indices.push(pending_index);
    }

    let extra_count =
        rng.range_usize(config.extra_connections.min, config.extra_connections.max);
    for _ in 0..extra_count {
        let from = rng.index(rooms.len());
        let mut to = rng.index(rooms.len() - 1);
        if to >= from {
            to += 1;
        }
        connections.push(Connection { from, to, kind: ConnectionKind::Extra });
    }

    connections
}

/// Closest (connected, pending) pair by center distance; ties go to the lowest
/// connected index, then the lowest pending index. Returns the pending slot.
fn nearest_pair(
    rooms: &[Rect],
    connected_room_indices: &[usize],
    pending_room_indices: &[usize],
    metric: DistanceMetric,
) -> (usize, usize) {
    let mut best_choice: Option<(i64, usize, usize, usize)> = None;
    for &connected_index in connected_room_indices {
        let connected_center = rooms[connected_index].center();
        for (pending_slot, &pending_index) in pending_room_indices.iter().enumerate() {
            let distance = center_distance(connected_center, rooms[pending_index].center(), metric);
            let candidate = (distance, connected_index, pending_index, pending_slot);
            if best_choice.is_none_or(|best| candidate < best) {
                best_choice = Some(candidate);
            }
        }
    }

    match best_choice {
        Some((_, connected_index, _, pending_slot)) => (connected_index, pending_slot),
        None => (connected_room_indices[0], 0),
    }
}

fn center_distance(a: Cell, b: Cell, metric: DistanceMetric) -> i64 {
    match metric {
        DistanceMetric::Manhattan => i64::from(a.manhattan(b)),
        DistanceMetric::Euclidean => a.squared_distance(b),
    }
}

/// Rooms reachable from room 0 through `connections`, as a per-room flag.
pub fn reachable_from_first(room_count: usize, connections: &[Connection]) -> Vec<bool> {
    let mut reached = vec![false; room_count];
    if room_count == 0 {
        return reached;
    }
    reached[0] = true;
    let mut open = vec![0_usize];
    while let Some(room) = open.pop() {
        for connection in connections {
            let next = if connection.from == room {
                connection.to
            } else if connection.to == room {
                connection.from
            } else {
                continue;
            };
            if !reached[next] {
                reached[next] = true;
                open.push(next);
            }
        }
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountRange;

    fn row_of_rooms(count: usize) -> Vec<Rect> {
        (0..count).map(|index| Rect::new(index as i32 * 10, 0, 5, 5)).collect()
    }

    #[test]
    fn full_density_reaches_every_room_from_room_zero() {
        let rooms = row_of_rooms(7);
        for strategy in [ConnectionStrategy::Nearest, ConnectionStrategy::Random] {
            let config = CorridorConfig { strategy, ..CorridorConfig::default() };
            let connections = build_connections(&rooms, &config, &mut DungeonRng::new(5));
            let skeleton =
                connections.iter().filter(|c| c.kind == ConnectionKind::Skeleton).count();
            assert_eq!(skeleton, rooms.len() - 1);
            assert!(reachable_from_first(rooms.len(), &connections).into_iter().all(|r| r));
        }
    }

    #[test]
    fn nearest_strategy_chains_a_row_in_order() {
        let rooms = row_of_rooms(4);
        let config = CorridorConfig {
            extra_connections: CountRange::new(0, 0),
            ..CorridorConfig::default()
        };
        let connections = build_connections(&rooms, &config, &mut DungeonRng::new(1));
        let pairs: Vec<(usize, usize)> = connections.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn zero_density_builds_no_skeleton() {
        let rooms = row_of_rooms(5);
        let config = CorridorConfig {
            connection_density: 0.0,
            extra_connections: CountRange::new(0, 0),
            ..CorridorConfig::default()
        };
        let connections = build_connections(&rooms, &config, &mut DungeonRng::new(9));
        assert!(connections.is_empty());
        let reached = reachable_from_first(rooms.len(), &connections);
        assert_eq!(reached.iter().filter(|&&r| r).count(), 1);
    }

    #[test]
    fn extra_connections_join_distinct_rooms() {
        let rooms = row_of_rooms(3);
        let config = CorridorConfig {
            extra_connections: CountRange::new(4, 4),
            ..CorridorConfig::default()
        };
        let connections = build_connections(&rooms, &config, &mut DungeonRng::new(21));
        let extras: Vec<&Connection> =
            connections.iter().filter(|c| c.kind == ConnectionKind::Extra).collect();
        assert_eq!(extras.len(), 4);
        assert!(extras.iter().all(|c| c.from != c.to && c.from < 3 && c.to < 3));
    }

    #[test]
    fn single_room_has_no_connections() {
        let connections =
            build_connections(&row_of_rooms(1), &CorridorConfig::default(), &mut DungeonRng::new(0));
        assert!(connections.is_empty());
    }

    #[test]
    fn euclidean_metric_can_prefer_a_diagonal_neighbor() {
        // Center of room 0 is (2, 2); room 1 center (9, 9); room 2 center (14, 2).
        let rooms = vec![Rect::new(0, 0, 5, 5), Rect::new(7, 7, 5, 5), Rect::new(12, 0, 5, 5)];
        let manhattan = nearest_pair(&rooms, &[0], &[1, 2], DistanceMetric::Manhattan);
        let euclidean = nearest_pair(&rooms, &[0], &[1, 2], DistanceMetric::Euclidean);
        assert_eq!(manhattan, (0, 1));
        assert_eq!(euclidean, (0, 0));
    }
}
