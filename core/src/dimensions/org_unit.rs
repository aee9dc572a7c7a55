use core::fmt;

use crate::parser::Function;

/// The organisation unit functions, each iterating a different slice of the
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrgUnitDimension {
    Level,
    Ancestor,
    Descendant,
    Peer,
    Group,
}

impl OrgUnitDimension {
    pub fn function(self) -> Function {
        match self {
            Self::Level => Function::OuLevel,
            Self::Ancestor => Function::OuAncestor,
            Self::Descendant => Function::OuDescendant,
            Self::Peer => Function::OuPeer,
            Self::Group => Function::OuGroup,
        }
    }
}

impl fmt::Display for OrgUnitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function().name())
    }
}

/// Fixed org unit paths used until a real hierarchy is plugged in behind
/// [`Resolver::org_units`](crate::evaluator::Resolver::org_units).
pub fn placeholder_members(dimension: OrgUnitDimension) -> &'static [&'static str] {
    match dimension {
        OrgUnitDimension::Level => &["ABC.DEF", "DEF.GHI"],
        OrgUnitDimension::Ancestor => &["ABC", "DEF"],
        OrgUnitDimension::Descendant => &["ABC.XYZ.DEF", "ABC.XYZ.GHI"],
        OrgUnitDimension::Peer => &["ABC.DEF", "ABC.GHI"],
        OrgUnitDimension::Group => &["ABCXYZ", "DEFXYZ"],
    }
}
