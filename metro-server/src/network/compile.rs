//! Route compilation: station sequences to segment sequences and back.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{SegmentId, StationName};

use super::catalog::SegmentCatalog;
use super::registry::StationRegistry;

/// Why a declared station was left out of a compiled route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not in the station registry
    Unknown,
    /// Registered, but excluded from routes
    Excluded,
}

/// A declared station that compilation jumped over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStation {
    /// Position in the declared sequence.
    pub index: usize,
    /// The name as declared.
    pub name: String,
    pub reason: SkipReason,
}

/// Result of compiling a station sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledRoute {
    /// Segment ids in travel order.
    pub segments: Vec<SegmentId>,
    /// Stations that were skipped, in declaration order.
    pub skipped: Vec<SkippedStation>,
}

/// Compile an ordered list of station names into segment ids.
///
/// Unknown and excluded stations are skipped, which splices the route over
/// the gap. Consecutive identical stations produce no segment. New segments
/// are registered in `catalog`.
pub fn compile_route<S: AsRef<str>>(
    registry: &StationRegistry,
    catalog: &mut SegmentCatalog,
    stations: &[S],
    excluded: &HashSet<StationName>,
) -> CompiledRoute {
    let mut route = CompiledRoute::default();
    let mut previous: Option<&StationName> = None;

    for (index, declared) in stations.iter().enumerate() {
        let declared = declared.as_ref();

        let Some(station) = registry.resolve(declared) else {
            route.skipped.push(SkippedStation {
                index,
                name: declared.to_string(),
                reason: SkipReason::Unknown,
            });
            continue;
        };

        if excluded.contains(station) {
            route.skipped.push(SkippedStation {
                index,
                name: declared.to_string(),
                reason: SkipReason::Excluded,
            });
            continue;
        }

        if let Some(prev) = previous {
            if prev != station {
                let (id, created) = catalog.register_or_get(prev, station);
                if created {
                    trace!(segment = %id, "registered segment");
                }
                route.segments.push(id);
            }
        }
        previous = Some(station);
    }

    if !route.skipped.is_empty() {
        debug!(
            declared = stations.len(),
            skipped = route.skipped.len(),
            "route compiled with skipped stations"
        );
    }

    route
}

/// Rebuild a station sequence from segment ids.
///
/// This is a best-effort inverse of [`compile_route`]. Each segment is
/// chained onto the running tail through its shared endpoint. When a
/// segment shares no endpoint with the tail, both of its endpoints are
/// appended and the chain continues from there. Unknown ids are ignored.
///
/// The first segment is oriented so that it leads into the second one when
/// they share an endpoint; otherwise its declared order is used.
pub fn stations_from_segments<S: AsRef<str>>(
    catalog: &SegmentCatalog,
    ids: &[S],
) -> Vec<StationName> {
    let segments: Vec<_> = ids
        .iter()
        .filter_map(|id| catalog.lookup(id.as_ref()))
        .collect();

    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };

    let leads_backwards = rest
        .first()
        .is_some_and(|next| next.has_endpoint(&first.from) && !next.has_endpoint(&first.to));

    let mut result = if leads_backwards {
        vec![first.to.clone(), first.from.clone()]
    } else {
        vec![first.from.clone(), first.to.clone()]
    };

    for segment in rest {
        let tail = &result[result.len() - 1];
        match segment.other_end(tail) {
            Some(next) => {
                let next = next.clone();
                result.push(next);
            }
            None => {
                result.push(segment.from.clone());
                result.push(segment.to.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> StationRegistry {
        let mut registry = StationRegistry::new();
        for (i, n) in names.iter().enumerate() {
            registry.register(n, i as f64, 0.0).unwrap();
        }
        registry
    }

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn compile(
        registry: &StationRegistry,
        catalog: &mut SegmentCatalog,
        stations: &[&str],
    ) -> CompiledRoute {
        compile_route(registry, catalog, stations, &HashSet::new())
    }

    fn ids(route: &CompiledRoute) -> Vec<&str> {
        route.segments.iter().map(SegmentId::as_str).collect()
    }

    #[test]
    fn empty_and_single_station() {
        let registry = registry(&["A"]);
        let mut catalog = SegmentCatalog::new();

        let empty: [&str; 0] = [];
        assert!(compile(&registry, &mut catalog, &empty).segments.is_empty());
        assert!(compile(&registry, &mut catalog, &["A"]).segments.is_empty());
        assert!(catalog.is_empty());
    }

    #[test]
    fn consecutive_pairs_in_order() {
        let registry = registry(&["A", "B", "C"]);
        let mut catalog = SegmentCatalog::new();

        let route = compile(&registry, &mut catalog, &["C", "B", "A"]);
        assert_eq!(ids(&route), vec!["B__C", "A__B"]);
        assert!(route.skipped.is_empty());
    }

    #[test]
    fn consecutive_duplicates_collapse() {
        let registry = registry(&["X", "Y"]);
        let mut catalog = SegmentCatalog::new();

        let with_dup = compile(&registry, &mut catalog, &["X", "X", "Y"]);
        let plain = compile(&registry, &mut catalog, &["X", "Y"]);
        assert_eq!(with_dup.segments, plain.segments);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn unknown_station_is_spliced_over() {
        let registry = registry(&["A", "B"]);
        let mut catalog = SegmentCatalog::new();

        let spliced = compile(&registry, &mut catalog, &["A", "UNKNOWN", "B"]);
        let direct = compile(&registry, &mut catalog, &["A", "B"]);

        assert_eq!(ids(&spliced), vec!["A__B"]);
        assert_eq!(spliced.segments, direct.segments);
        assert_eq!(
            spliced.skipped,
            vec![SkippedStation {
                index: 1,
                name: "UNKNOWN".into(),
                reason: SkipReason::Unknown,
            }]
        );
    }

    #[test]
    fn skip_that_creates_duplicate_collapses() {
        let registry = registry(&["A", "B"]);
        let mut catalog = SegmentCatalog::new();

        let route = compile(&registry, &mut catalog, &["A", "Nowhere", "A", "B"]);
        assert_eq!(ids(&route), vec!["A__B"]);
    }

    #[test]
    fn excluded_station_is_skipped() {
        let registry = registry(&["A", "K", "B"]);
        let mut catalog = SegmentCatalog::new();
        let excluded: HashSet<_> = [name("K")].into_iter().collect();

        let route = compile_route(&registry, &mut catalog, &["A", "K", "B"], &excluded);
        assert_eq!(ids(&route), vec!["A__B"]);
        assert_eq!(route.skipped[0].reason, SkipReason::Excluded);
        assert!(catalog.lookup("A__K").is_none());
    }

    #[test]
    fn compiling_twice_does_not_grow_catalog() {
        let registry = registry(&["A", "B", "C", "D"]);
        let mut catalog = SegmentCatalog::new();

        compile(&registry, &mut catalog, &["A", "B", "C", "D"]);
        let size = catalog.len();
        compile(&registry, &mut catalog, &["A", "B", "C", "D"]);
        compile(&registry, &mut catalog, &["D", "C", "B", "A"]);

        assert_eq!(catalog.len(), size);
    }

    #[test]
    fn stations_roundtrip_contiguous_route() {
        let registry = registry(&["A", "B", "C", "D"]);
        let mut catalog = SegmentCatalog::new();

        let route = compile(&registry, &mut catalog, &["A", "B", "C", "D"]);
        let stations = stations_from_segments(&catalog, &route.segments);

        assert_eq!(stations, vec![name("A"), name("B"), name("C"), name("D")]);
    }

    #[test]
    fn stations_orients_first_segment() {
        let registry = registry(&["A", "B", "C"]);
        let mut catalog = SegmentCatalog::new();

        // Registers A-B with from=A
        compile(&registry, &mut catalog, &["A", "B"]);
        let route = compile(&registry, &mut catalog, &["B", "A", "C"]);
        let stations = stations_from_segments(&catalog, &route.segments);

        assert_eq!(stations, vec![name("B"), name("A"), name("C")]);
    }

    #[test]
    fn stations_reanchor_on_discontinuity() {
        let registry = registry(&["A", "B", "C", "D"]);
        let mut catalog = SegmentCatalog::new();
        compile(&registry, &mut catalog, &["A", "B"]);
        compile(&registry, &mut catalog, &["C", "D"]);

        let stations = stations_from_segments(&catalog, &["A__B", "C__D"]);
        assert_eq!(stations, vec![name("A"), name("B"), name("C"), name("D")]);
    }

    #[test]
    fn stations_ignore_unknown_ids() {
        let registry = registry(&["A", "B"]);
        let mut catalog = SegmentCatalog::new();
        compile(&registry, &mut catalog, &["A", "B"]);

        assert!(stations_from_segments::<&str>(&catalog, &[]).is_empty());
        assert!(stations_from_segments(&catalog, &["X__Y"]).is_empty());
        assert_eq!(
            stations_from_segments(&catalog, &["X__Y", "A__B"]),
            vec![name("A"), name("B")]
        );
    }
}
