mod common;
mod deck_scenarios;
mod invariants;
mod refresh;
mod tutorial;
