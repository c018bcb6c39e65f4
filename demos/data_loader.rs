//! Data Loader
//!
//! This example wires a side effect reducer into a tiny "component" that
//! re-renders every time its committed state changes.
//!
//! Key concepts:
//! - Reducer stays pure: it only flips `loading` and stores results
//! - The side effect performs the (simulated) network request
//! - The effect's follow-up action completes the load without any extra wiring
//!
//! Run with: cargo run --example data_loader

use aftermath::builder::SideEffectReducerFactory;
use aftermath::effects::no_follow_up;
use std::time::Duration;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
struct State {
    loading: bool,
    data: Option<String>,
}

#[derive(Debug)]
enum Action {
    Load(String),
    LoadSuccessful(String),
}

// Environment handed to effects
#[derive(Clone)]
struct Api {
    latency: Duration,
}

impl Api {
    async fn fetch(&self, name: &str) -> Result<String, String> {
        tokio::time::sleep(self.latency).await;
        Ok(format!("profile of {name}"))
    }
}

fn reduce(state: &State, action: &Action) -> State {
    match action {
        Action::Load(_) => State {
            loading: true,
            ..state.clone()
        },
        Action::LoadSuccessful(data) => State {
            loading: false,
            data: Some(data.clone()),
        },
    }
}

fn load_effect(_: &State, action: &Action) -> BoxedEffect<Option<Action>, String, Api> {
    match action {
        Action::Load(name) => {
            let name = name.clone();
            from_async(move |api: &Api| {
                let api = api.clone();
                async move {
                    let data = api.fetch(&name).await?;
                    Ok::<_, String>(Some(Action::LoadSuccessful(data)))
                }
            })
            .boxed()
        }
        Action::LoadSuccessful(_) => no_follow_up(),
    }
}

fn render(state: &State) {
    if state.loading {
        println!("  Loading...");
    }
    match &state.data {
        Some(data) => println!("  Result: {}", data),
        None if !state.loading => println!("  Please press the button"),
        None => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    println!("=== Data Loader Example ===\n");

    let use_loader = SideEffectReducerFactory::with_env(
        load_effect,
        Api {
            latency: Duration::from_millis(100),
        },
    );
    let component = use_loader.create(
        reduce,
        State {
            loading: false,
            data: None,
        },
    )?;
    let (state, dispatch) = component.parts();

    println!("Initial render:");
    render(&state);

    println!("\nButton pressed:");
    dispatch.dispatch(Action::Load("ada".to_string()));
    render(&component.state());

    let mut updates = component.subscribe();
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        println!("\nRe-render:");
        render(&state);
        if !state.loading {
            break;
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
