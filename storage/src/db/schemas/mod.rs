#![allow(clippy::module_name_repetitions)]

/// Defines a ULID backed identifier newtype.
///
/// ULIDs carry 80 random bits per millisecond, so ids minted concurrently (or in a tight
/// loop) don't collide, and they sort by creation time.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(ulid::Ulid);

        impl $name {
            /// Mint a new, unique id.
            #[must_use]
            #[inline]
            pub fn generate() -> Self {
                Self(ulid::Ulid::new())
            }

            #[must_use]
            #[inline]
            pub const fn from_ulid(ulid: ulid::Ulid) -> Self {
                Self(ulid)
            }

            #[must_use]
            #[inline]
            pub const fn as_ulid(&self) -> ulid::Ulid {
                self.0
            }
        }

        impl From<ulid::Ulid> for $name {
            #[inline]
            fn from(ulid: ulid::Ulid) -> Self {
                Self(ulid)
            }
        }

        impl std::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::Error;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(ulid::Ulid::from_string(s.trim())?))
            }
        }
    };
}

pub mod playlist;
pub mod song;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{playlist::PlaylistId, song::SongId};
    use crate::errors::Error;

    #[test]
    fn test_ids_are_unique_in_a_tight_loop() {
        let ids = (0..10_000).map(|_| SongId::generate()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_ids_are_unique_across_threads() {
        let handles = (0..4)
            .map(|_| {
                std::thread::spawn(|| (0..1000).map(|_| PlaylistId::generate()).collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();
        let ids = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 4000);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let id = SongId::generate();
        let parsed: SongId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("01ARZ3NDEKTSV4RRFFQ69G5FA")]
    #[case::bad_char("01ARZ3NDEKTSV4RRFFQ69G5FA!")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(matches!(input.parse::<SongId>(), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_serializes_as_string() {
        let id = PlaylistId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: PlaylistId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
