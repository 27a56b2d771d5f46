//! Assembly of airfoil sections along a wing span.
//!
//! A `Wing` holds a registry of named profiles and the list of placed sections. Sections are
//! placed either from explicit leading and trailing edge positions or directly from the output
//! of a chordline march, and can be exported as plain point lists for lofting.

use crate::airfoil::{AirfoilProfile, NormalField, ProfileFormat, SectionFrame};
use crate::march::ChordlineSample;
use crate::{Point3, Result, UnitVec3, Vector3, WingError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Which way the section normals face relative to the normals given or estimated for each
/// station. Flipping the orientation mirrors the outline's thickness direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Positive,
    Negative,
}

impl Orientation {
    pub fn sign(&self) -> f64 {
        match self {
            Orientation::Positive => 1.0,
            Orientation::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone)]
struct PlacedSection {
    profile: String,
    frame: SectionFrame,
}

/// A wing made of airfoil sections placed along a span.
#[derive(Debug, Clone)]
pub struct Wing {
    name: String,
    profiles: HashMap<String, Arc<AirfoilProfile>>,
    sections: Vec<PlacedSection>,
}

/// One exported section: the profile it was made from and its placed points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionExport {
    pub profile: String,
    pub chord: f64,
    pub lead: Point3,
    pub trail: Point3,
    pub points: Vec<Point3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingExport {
    pub name: String,
    pub sections: Vec<SectionExport>,
}

impl Wing {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            profiles: HashMap::new(),
            sections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read a profile from a coordinate table file and register it. When no name is given the
    /// profile is registered under the path it was read from. Returns the registered name.
    ///
    /// # Arguments
    ///
    /// * `path`: the coordinate table file
    /// * `name`: an optional name to register the profile under
    /// * `format`: how to read the table
    ///
    /// returns: Result<String, WingError>
    pub fn load_profile<P: AsRef<Path>>(
        &mut self,
        path: P,
        name: Option<&str>,
        format: &ProfileFormat,
    ) -> Result<String> {
        let profile = AirfoilProfile::from_file(path.as_ref(), format)?;
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| path.as_ref().display().to_string());
        self.insert_profile(&name, profile);
        Ok(name)
    }

    /// Register a profile under a name, replacing any profile already registered with it.
    pub fn insert_profile(&mut self, name: &str, profile: AirfoilProfile) {
        if self.profiles.contains_key(name) {
            log::warn!("Replacing the registered profile '{name}'");
        }
        self.profiles.insert(name.to_string(), Arc::new(profile));
    }

    pub fn profile(&self, name: &str) -> Option<&AirfoilProfile> {
        self.profiles.get(name).map(|p| p.as_ref())
    }

    fn shared_profile(&self, name: &str) -> Result<Arc<AirfoilProfile>> {
        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| WingError::InvalidParameter(format!("no profile named '{name}'")))
    }

    /// Place one section per station. Each station gets a fresh copy of its named profile,
    /// transformed so that its edges land on the given leading and trailing positions and its
    /// normal faces along `orientation` times the station normal.
    ///
    /// When `normals` is `None` the station normals are estimated from the edge positions with
    /// `NormalField::compute`. Nothing is added to the wing if any station fails.
    ///
    /// # Arguments
    ///
    /// * `names`: the profile name for each station
    /// * `leads`: the leading edge position of each station
    /// * `trails`: the trailing edge position of each station
    /// * `orientation`: the sign applied to every normal
    /// * `normals`: optional explicit normals, one per station
    ///
    /// returns: Result<(), WingError>
    pub fn add_sections(
        &mut self,
        names: &[&str],
        leads: &[Point3],
        trails: &[Point3],
        orientation: Orientation,
        normals: Option<&[UnitVec3]>,
    ) -> Result<()> {
        let n = leads.len();
        if names.len() != n || trails.len() != n {
            return Err(WingError::InvalidParameter(format!(
                "{} profile names, {} leading edges and {} trailing edges do not match",
                names.len(),
                n,
                trails.len()
            )));
        }

        let normals = match normals {
            Some(given) if given.len() != n => {
                return Err(WingError::InvalidParameter(format!(
                    "{} normals given for {n} stations",
                    given.len()
                )));
            }
            Some(given) => given.to_vec(),
            None => NormalField::compute(leads, trails)?,
        };

        let mut placed = Vec::with_capacity(n);
        for i in 0..n {
            let profile = self.shared_profile(names[i])?;
            let mut frame = SectionFrame::build(profile)?;
            let normal: Vector3 = normals[i].into_inner() * orientation.sign();
            frame.transform(&leads[i], &trails[i], &normal)?;
            placed.push(PlacedSection {
                profile: names[i].to_string(),
                frame,
            });
        }

        log::debug!("Placed {n} sections on wing '{}'", self.name);
        self.sections.extend(placed);
        Ok(())
    }

    /// Place a section of the named profile on every chordline found by a march. With
    /// `normals_from_march` the cutting plane normals of the march become the section normals,
    /// otherwise they are estimated from the chordlines.
    pub fn add_chordlines(
        &mut self,
        name: &str,
        samples: &[ChordlineSample],
        orientation: Orientation,
        normals_from_march: bool,
    ) -> Result<()> {
        let leads = samples.iter().map(|s| s.leading).collect::<Vec<_>>();
        let trails = samples.iter().map(|s| s.trailing).collect::<Vec<_>>();
        let names = vec![name; samples.len()];
        let normals = normals_from_march
            .then(|| samples.iter().map(|s| s.normal()).collect::<Vec<_>>());

        self.add_sections(&names, &leads, &trails, orientation, normals.as_deref())
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionFrame> {
        self.sections.iter().map(|s| &s.frame)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The placed points of every section, as closed polylines.
    pub fn section_polylines(&self) -> Vec<Vec<Point3>> {
        self.sections.iter().map(|s| s.frame.xyz().to_vec()).collect()
    }

    /// Split every section into `n` runs from the trailing edge to the leading edge followed by
    /// `n` runs from the leading edge back around to the trailing edge. Consecutive runs share
    /// their boundary point, so a consumer can fit one spline per run and join them.
    ///
    /// # Arguments
    ///
    /// * `n`: the number of runs on each side of the section
    ///
    /// returns: Result<Vec<Vec<Vec<Point3>>>, WingError>
    pub fn segmented_sections(&self, n: usize) -> Result<Vec<Vec<Vec<Point3>>>> {
        if n == 0 {
            return Err(WingError::InvalidParameter(
                "a section side needs at least one run".to_string(),
            ));
        }

        self.sections
            .iter()
            .map(|s| {
                let profile = s.frame.profile();
                let xyz = s.frame.xyz();
                let upper = loop_run(xyz, profile.trailing_edge_idx(), profile.leading_edge_idx());
                let lower = loop_run(xyz, profile.leading_edge_idx(), profile.trailing_edge_idx());

                let mut runs = split_runs(&upper, n)?;
                runs.extend(split_runs(&lower, n)?);
                Ok(runs)
            })
            .collect()
    }

    pub fn export(&self) -> WingExport {
        let sections = self
            .sections
            .iter()
            .map(|s| SectionExport {
                profile: s.profile.clone(),
                chord: s.frame.chord(),
                lead: s.frame.lead_pos(),
                trail: s.frame.trail_pos(),
                points: s.frame.xyz().to_vec(),
            })
            .collect();

        WingExport {
            name: self.name.clone(),
            sections,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}

/// The points of a closed outline walking forward from index `from` to index `to`, wrapping past
/// the repeated closing point when `to` comes before `from`.
fn loop_run(closed: &[Point3], from: usize, to: usize) -> Vec<Point3> {
    let m = closed.len() - 1;
    let count = (to + m - from) % m;
    (0..=count).map(|k| closed[(from + k) % m]).collect()
}

/// Split a run of points into `n` consecutive runs sharing their end points.
fn split_runs(points: &[Point3], n: usize) -> Result<Vec<Vec<Point3>>> {
    let segments = points.len().saturating_sub(1);
    if segments < n {
        return Err(WingError::InvalidParameter(format!(
            "cannot split {segments} segments into {n} runs"
        )));
    }

    let bounds = (0..=n).map(|k| k * segments / n).collect::<Vec<_>>();
    Ok(bounds
        .windows(2)
        .map(|w| points[w[0]..=w[1]].to_vec())
        .collect())
}
