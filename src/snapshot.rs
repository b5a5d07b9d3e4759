use crate::config::DiagramConfig;
use crate::diagram::Diagram;
use crate::error::{DiagramError, Result};
use crate::math::Point2;

/// Persisted form of a diagram.
///
/// Crossing geometry is always re-derived from the vertices. Only the
/// crossings whose over/under order was toggled away from the default are
/// stored, keyed by their segment pair (two straight segments cross at most
/// once, so the pair names the crossing).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagramSnapshot {
    pub vertices: Vec<Point2>,
    /// Segment pairs (ascending) of toggled crossings, ascending.
    pub toggled: Vec<[usize; 2]>,
}

impl Diagram {
    /// Captures the vertices and the toggled crossings.
    #[must_use]
    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot {
            vertices: self.vertices().to_vec(),
            toggled: self
                .crossings()
                .into_iter()
                .filter(|c| !c.has_default_order())
                .map(|c| c.segments)
                .collect(),
        }
    }

    /// Rebuilds a diagram from a snapshot.
    ///
    /// Restored crossings get fresh identities.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Diagram::with_config`], or
    /// `DiagramError::NoCrossingOnSegments` if a toggled pair does not cross.
    pub fn restore(snapshot: &DiagramSnapshot, config: DiagramConfig) -> Result<Self> {
        let mut diagram = Self::with_config(snapshot.vertices.clone(), config)?;
        for &[first, second] in &snapshot.toggled {
            let id = diagram
                .crossing_on(first, second)
                .map(|c| c.id)
                .ok_or(DiagramError::NoCrossingOnSegments { first, second })?;
            diagram.toggle_crossing(id)?;
        }
        Ok(diagram)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KnodiaError;

    const TREFOIL: [(f64, f64); 10] = [
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, -2.0),
        (4.0, -2.0),
        (4.0, -4.0),
        (1.0, -4.0),
        (1.0, -1.0),
        (3.0, -1.0),
        (3.0, -3.0),
        (0.0, -3.0),
    ];

    #[test]
    fn snapshot_records_only_toggled_crossings() {
        let mut d = Diagram::from_coordinates(&TREFOIL).unwrap();
        assert!(d.snapshot().toggled.is_empty());
        let id = d.crossings()[1].id;
        d.toggle_crossing(id).unwrap();
        assert_eq!(d.snapshot().toggled, vec![[2, 7]]);
    }

    #[test]
    fn restore_reproduces_export() {
        let mut d = Diagram::from_coordinates(&TREFOIL).unwrap();
        let id = d.crossings()[1].id;
        d.toggle_crossing(id).unwrap();
        let restored = Diagram::restore(&d.snapshot(), DiagramConfig::default()).unwrap();
        assert_eq!(restored.export_code(), d.export_code());
        assert_eq!(restored.vertices(), d.vertices());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_round_trips_through_json() {
        let mut d = Diagram::from_coordinates(&TREFOIL).unwrap();
        let id = d.crossing_on(7, 2).unwrap().id;
        d.toggle_crossing(id).unwrap();
        let snapshot = d.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: DiagramSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        let restored = Diagram::restore(&back, DiagramConfig::default()).unwrap();
        assert_eq!(restored.export_code(), d.export_code());
    }

    #[test]
    fn restore_rejects_missing_crossing() {
        let snapshot = DiagramSnapshot {
            vertices: TREFOIL.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            toggled: vec![[0, 4]],
        };
        let err = Diagram::restore(&snapshot, DiagramConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            KnodiaError::Diagram(DiagramError::NoCrossingOnSegments { first: 0, second: 4 })
        ));
    }
}
