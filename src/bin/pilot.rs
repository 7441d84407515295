use bevy::prelude::*;
use skyfire::{build_app, Iteration};

fn main() -> AppExit {
    build_app(Iteration::Flight).run()
}
