use crate::bounding_box::BoundingBox;
use crate::geometry::Geometry;

/// Ordered collection of geometries of any type, including other collections.
///
/// Cloning, comparing and dropping do not recurse into nested collections, so the nesting depth is only limited by
/// memory. The `Debug` output is produced recursively and should not be used on very deep collections.
#[derive(Debug, Default)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    bbox: Option<BoundingBox>,
}

impl GeometryCollection {
    /// Creates a new collection.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            bbox: None,
        }
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Geometries of the collection.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Consumes the collection returning its geometries.
    pub fn into_geometries(mut self) -> Vec<Geometry> {
        std::mem::take(&mut self.geometries)
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}

/// Collection being cloned, with the members that are not visited yet.
struct CloneFrame<'a> {
    members: std::slice::Iter<'a, Geometry>,
    bbox: Option<BoundingBox>,
    cloned: Vec<Geometry>,
}

impl<'a> CloneFrame<'a> {
    fn new(source: &'a GeometryCollection) -> Self {
        Self {
            members: source.geometries.iter(),
            bbox: source.bbox,
            cloned: Vec::with_capacity(source.geometries.len()),
        }
    }

    fn finish(self) -> GeometryCollection {
        GeometryCollection::new(self.cloned).with_bbox(self.bbox)
    }
}

impl Clone for GeometryCollection {
    fn clone(&self) -> Self {
        let mut root = CloneFrame::new(self);
        let mut nested: Vec<CloneFrame> = vec![];

        loop {
            let frame = match nested.last_mut() {
                Some(frame) => frame,
                None => &mut root,
            };

            match frame.members.next() {
                Some(Geometry::GeometryCollection(collection)) => {
                    nested.push(CloneFrame::new(collection))
                }
                Some(simple) => frame.cloned.push(simple.clone()),
                None => {
                    let Some(finished) = nested.pop() else {
                        return root.finish();
                    };

                    let parent = match nested.last_mut() {
                        Some(parent) => parent,
                        None => &mut root,
                    };
                    parent.cloned.push(finished.finish().into());
                }
            }
        }
    }
}

impl PartialEq for GeometryCollection {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.bbox != right.bbox || left.geometries.len() != right.geometries.len() {
                return false;
            }

            for pair in left.geometries.iter().zip(&right.geometries) {
                match pair {
                    (Geometry::GeometryCollection(l), Geometry::GeometryCollection(r)) => {
                        pending.push((l, r))
                    }
                    (l, r) => {
                        if l != r {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }
}

impl Drop for GeometryCollection {
    // Nested collections are flattened before being dropped, so the drop depth does not grow with nesting.
    fn drop(&mut self) {
        let mut stack: Vec<Geometry> = std::mem::take(&mut self.geometries);
        while let Some(geometry) = stack.pop() {
            if let Geometry::GeometryCollection(mut collection) = geometry {
                stack.append(&mut collection.geometries);
            }
        }
    }
}
