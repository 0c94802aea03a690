//! Pure walkthrough logic for the shop street.
//!
//! This crate holds everything about the street that doesn't need a
//! renderer: shop footprints, wall collision with a front door, threshold
//! crossings, distributing a shop's items over its three inner walls, and
//! the walker that moves the camera. Functions take plain data and return
//! plain results, so a viewer only has to draw what they report.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ambience`] | Interior/exterior background switching |
//! | [`catalog`] | JSON street catalog loading and validation |
//! | [`collision`] | Wall blocking, door zone, threshold detection |
//! | [`config`] | Street tunables and their validation |
//! | [`geometry`] | Vectors, bounds, shop footprint checks |
//! | [`layout`] | Wall capacities, item allocation, frame placement |
//! | [`movement`] | Camera-relative walking, jumping, gravity |
//! | [`shop`] | Shop descriptors, items, presence state |
//! | [`street`] | Per-tick session over all shops and the player |

pub mod ambience;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod movement;
pub mod shop;
pub mod street;
