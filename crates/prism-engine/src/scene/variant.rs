use std::fmt;
use std::str::FromStr;

/// Selects which demo scene runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Variant {
    /// Colored quad drawn from a plain triangle list.
    Quad,
    /// Colored quad drawn through an index buffer.
    QuadIndexed,
    /// Colored cube spun by a model matrix.
    #[default]
    Cube,
    /// Colored cube with a fixed camera and perspective projection.
    CubePerspective,
    /// Checker-textured cube with perspective projection.
    CubeTextured,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Quad,
        Variant::QuadIndexed,
        Variant::Cube,
        Variant::CubePerspective,
        Variant::CubeTextured,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Quad => "quad",
            Variant::QuadIndexed => "quad-indexed",
            Variant::Cube => "cube",
            Variant::CubePerspective => "cube-perspective",
            Variant::CubeTextured => "cube-textured",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Variant::ALL.iter().map(|v| v.name()).collect();
                anyhow::anyhow!("unknown variant {s:?} (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_name() {
        for v in Variant::ALL {
            assert_eq!(v.name().parse::<Variant>().unwrap(), v);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_underscores() {
        assert_eq!("Cube_Perspective".parse::<Variant>().unwrap(), Variant::CubePerspective);
        assert_eq!(" quad ".parse::<Variant>().unwrap(), Variant::Quad);
    }

    #[test]
    fn parse_unknown_lists_choices() {
        let err = "sphere".parse::<Variant>().unwrap_err().to_string();
        assert!(err.contains("sphere"));
        assert!(err.contains("cube-textured"));
    }

    #[test]
    fn default_is_spinning_cube() {
        assert_eq!(Variant::default(), Variant::Cube);
    }
}
