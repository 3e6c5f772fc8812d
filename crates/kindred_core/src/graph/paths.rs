//! Shortest relationship paths between chosen people.

use super::kinship::KinshipIndex;
use crate::model::Handle;
use std::collections::{HashMap, HashSet, VecDeque};

/// Unweighted hop distance from `start` to everyone reachable over kin edges.
pub fn bfs_distances(index: &KinshipIndex, start: Handle) -> HashMap<Handle, usize> {
    let mut distances = HashMap::new();
    if !index.contains(start) {
        return distances;
    }
    distances.insert(start, 0);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let next_distance = distances.get(&current).copied().unwrap_or(0) + 1;
        for neighbor in index.neighbors(current) {
            if !distances.contains_key(neighbor) {
                distances.insert(*neighbor, next_distance);
                queue.push_back(*neighbor);
            }
        }
    }
    distances
}

/// Union of the vertices of every shortest kin path between any two of
/// `endpoints`, endpoints included.
///
/// Unknown endpoints are ignored and a single known endpoint yields itself.
/// With two or more known endpoints, an endpoint that cannot reach any other
/// endpoint contributes nothing. Equal-length alternatives all contribute.
pub fn shortest_path_union(index: &KinshipIndex, endpoints: &[Handle]) -> HashSet<Handle> {
    let mut known = Vec::new();
    for handle in endpoints {
        if index.contains(*handle) && !known.contains(handle) {
            known.push(*handle);
        }
    }

    let mut result = HashSet::new();
    match known.as_slice() {
        [] => return result,
        [only] => {
            result.insert(*only);
            return result;
        }
        _ => {}
    }

    let distances = known
        .iter()
        .map(|handle| bfs_distances(index, *handle))
        .collect::<Vec<_>>();

    for (i, from) in known.iter().enumerate() {
        for (j, to) in known.iter().enumerate().skip(i + 1) {
            let Some(&length) = distances[i].get(to) else {
                continue;
            };
            result.insert(*from);
            result.insert(*to);
            // v is on a shortest from-to path iff d(from, v) + d(v, to) == d(from, to)
            for (vertex, from_distance) in &distances[i] {
                if *from_distance > length {
                    continue;
                }
                if let Some(to_distance) = distances[j].get(vertex) {
                    if from_distance + to_distance == length {
                        result.insert(*vertex);
                    }
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{bfs_distances, shortest_path_union};
    use crate::db::MemoryDb;
    use crate::graph::KinshipIndex;
    use crate::model::family::{ChildRef, Family};
    use crate::model::person::{Gender, Name, Person};
    use crate::model::Handle;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn add(db: &mut MemoryDb, id: &str) -> Handle {
        db.add_person(Person::new(id, Gender::Unknown, Name::new("A", "B")))
            .unwrap()
    }

    #[test]
    fn distances_cross_families() {
        let mut db = MemoryDb::new();
        let father = add(&mut db, "I1");
        let child = add(&mut db, "I2");
        let grandchild = add(&mut db, "I3");
        db.add_family(Family::new("F1", Some(father), None).with_child(ChildRef::birth(child)))
            .unwrap();
        db.add_family(Family::new("F2", None, Some(child)).with_child(ChildRef::birth(grandchild)))
            .unwrap();

        let index = KinshipIndex::build(&db);
        let distances = bfs_distances(&index, father);
        assert_eq!(distances[&grandchild], 2);
        assert!(bfs_distances(&index, Uuid::new_v4()).is_empty());
    }

    #[test]
    fn keeps_every_tied_path() {
        // Two cousins joined through both of their shared grandparents.
        let mut db = MemoryDb::new();
        let grandpa = add(&mut db, "I1");
        let grandma = add(&mut db, "I2");
        let uncle = add(&mut db, "I3");
        let aunt = add(&mut db, "I4");
        let cousin_a = add(&mut db, "I5");
        let cousin_b = add(&mut db, "I6");
        let outsider = add(&mut db, "I7");
        db.add_family(
            Family::new("F1", Some(grandpa), Some(grandma))
                .with_child(ChildRef::birth(uncle))
                .with_child(ChildRef::birth(aunt)),
        )
        .unwrap();
        db.add_family(Family::new("F2", Some(uncle), None).with_child(ChildRef::birth(cousin_a)))
            .unwrap();
        db.add_family(Family::new("F3", None, Some(aunt)).with_child(ChildRef::birth(cousin_b)))
            .unwrap();

        let index = KinshipIndex::build(&db);
        let path = shortest_path_union(&index, &[cousin_a, cousin_b]);
        assert_eq!(
            path,
            HashSet::from([cousin_a, uncle, grandpa, grandma, aunt, cousin_b])
        );

        assert!(shortest_path_union(&index, &[]).is_empty());
        assert_eq!(
            shortest_path_union(&index, &[outsider, Uuid::new_v4()]),
            HashSet::from([outsider])
        );
        assert!(shortest_path_union(&index, &[cousin_a, outsider]).is_empty());
    }
}
