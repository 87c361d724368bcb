// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [proptest::Arbitrary](Arbitrary) implementation for `UniformPathBuf` and `Box<UniformPath>`. Note
//! that implementions for `Rc<UniformPath>` and `Arc<UniformPath>` are not possible due to orphan
//! rules.

// NOTE: #[cfg(feature = "proptest1")] is specified here to work with `doc_cfg`.

use crate::{UniformPath, UniformPathBuf};
use proptest::{arbitrary::StrategyFor, prelude::*, strategy::MapInto};

/// The [`Arbitrary`] impl for `UniformPathBuf` returns a canonical path with between 0 and 8
/// segments, absolute half of the time.
///
/// Segments are short names over `[a-z0-9_.-]` that are never made only of dots, optionally
/// preceded by `..` segments when the path is relative.
#[cfg(feature = "proptest1")]
impl Arbitrary for UniformPathBuf {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        let segment = "[a-z0-9_-][a-z0-9_.-]{0,7}";
        (
            any::<bool>(),
            0..3usize,
            prop::collection::vec(segment, 0..8),
        )
            .prop_map(|(absolute, parents, segments)| {
                let parents = if absolute { 0 } else { parents };
                let body = std::iter::repeat("..".to_owned())
                    .take(parents)
                    .chain(segments)
                    .collect::<Vec<_>>()
                    .join("/");
                let text = if absolute { format!("/{}", body) } else { body };
                UniformPathBuf::from_canonical_unchecked(text)
            })
            .boxed()
    }
}

/// The [`Arbitrary`] impl for `Box<UniformPath>` boxes an arbitrary `UniformPathBuf`.
#[cfg(feature = "proptest1")]
impl Arbitrary for Box<UniformPath> {
    type Parameters = <UniformPathBuf as Arbitrary>::Parameters;
    type Strategy = MapInto<StrategyFor<UniformPathBuf>, Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        any_with::<UniformPathBuf>(args).prop_map_into()
    }
}
