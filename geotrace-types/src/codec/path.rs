use std::fmt::{Display, Formatter, Write};

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root(&'a str),
    Key(&'static str),
    Index(usize),
}

/// Location of a value inside the decoded document, rendered as `$.features[1].geometry`.
///
/// Paths are linked through borrowed parents, so building one for every visited value does not allocate. The
/// string is only produced when an error is reported.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsonPath<'a> {
    parent: Option<&'a JsonPath<'a>>,
    segment: Segment<'a>,
}

impl<'a> JsonPath<'a> {
    pub(crate) fn root(prefix: &'a str) -> Self {
        Self {
            parent: None,
            segment: Segment::Root(prefix),
        }
    }

    pub(crate) fn key(&'a self, key: &'static str) -> JsonPath<'a> {
        Self {
            parent: Some(self),
            segment: Segment::Key(key),
        }
    }

    pub(crate) fn index(&'a self, index: usize) -> JsonPath<'a> {
        Self {
            parent: Some(self),
            segment: Segment::Index(index),
        }
    }
}

impl Display for JsonPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut segments = vec![self.segment];
        let mut current = self.parent;
        while let Some(path) = current {
            segments.push(path.segment);
            current = path.parent;
        }

        for segment in segments.into_iter().rev() {
            match segment {
                Segment::Root(prefix) => f.write_str(prefix)?,
                Segment::Key(key) => {
                    f.write_char('.')?;
                    f.write_str(key)?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_path() {
        let root = JsonPath::root("$");
        let features = root.key("features");
        let feature = features.index(2);
        let geometry = feature.key("geometry");
        assert_eq!(geometry.to_string(), "$.features[2].geometry");
        assert_eq!(root.to_string(), "$");
    }
}
