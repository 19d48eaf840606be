// Mutation roots, one submodule per entity

pub mod command;
pub mod platform;

use async_graphql::*;

/// Represents the mutations available.
#[derive(Default, MergedObject)]
pub struct Mutation(pub platform::PlatformMutation, pub command::CommandMutation);
