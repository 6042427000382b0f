//! Scripted exploration session driven by stdin commands.
//!
//! One command per line:
//!
//!   root <id>              select or toggle a root tile
//!   root-query <text...>   free-text query at the root slot
//!   select <layer> <id>    select or toggle a tile at a layer
//!   query <layer> <text..> free-text query at a layer
//!   show <layer>           reveal a layer
//!   hide <layer>           collapse a layer and everything beneath
//!   tiles <layer>          print the layer's tile batch
//!   next                   print the next expandable layer
//!   insights               print the current insight set and subtitle
//!   trail                  print the breadcrumb trail
//!   state                  print the full machine state
//!   reset                  clear the session
//!
//! Prints drained change events after every mutating command.

use std::io::{self, BufRead};

use serde_json::json;

use drilldown::config::Config;
use drilldown::insights;
use drilldown::layers::ExplorationLayers;
use drilldown::trail::Trail;

fn print_state(machine: &ExplorationLayers) {
    let state = json!({
        "root": machine.root_selection(),
        "active": machine.active_selections(),
        "visible": machine.visible_layers(),
        "digest": machine.state_digest(),
    });
    println!("{}", state);
}

fn main() {
    let cfg = Config::from_env();
    let mut machine = ExplorationLayers::new(&cfg);
    let mut trail = Trail::new();
    let stdin = io::stdin();

    for line in stdin.lock().lines().flatten() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.splitn(3, ' ');
        let cmd = parts.next().unwrap_or_default();
        let arg1 = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();

        match cmd {
            "root" => {
                machine.select_root(arg1);
                trail.push_exploration(arg1);
            }
            "root-query" => {
                let text = if rest.is_empty() {
                    arg1.to_string()
                } else {
                    format!("{} {}", arg1, rest)
                };
                machine.select_root_custom_query(&text);
            }
            "select" => match arg1.parse::<usize>() {
                Ok(layer) => {
                    machine.select_tile(rest, layer);
                    trail.push_exploration(rest);
                }
                Err(err) => eprintln!("bad layer {:?}: {}", arg1, err),
            },
            "query" => match arg1.parse::<usize>() {
                Ok(layer) => machine.select_custom_query(rest, layer),
                Err(err) => eprintln!("bad layer {:?}: {}", arg1, err),
            },
            "show" => match arg1.parse::<usize>() {
                Ok(layer) => machine.show_layer(layer),
                Err(err) => eprintln!("bad layer {:?}: {}", arg1, err),
            },
            "hide" => match arg1.parse::<usize>() {
                Ok(layer) => machine.hide_layer(layer),
                Err(err) => eprintln!("bad layer {:?}: {}", arg1, err),
            },
            "tiles" => match arg1.parse::<usize>() {
                Ok(layer) => {
                    let batch = machine.tiles_for_layer(layer);
                    println!("{}", json!({ "layer": layer, "tiles": batch }));
                }
                Err(err) => eprintln!("bad layer {:?}: {}", arg1, err),
            },
            "next" => {
                println!("{}", json!({ "next_expandable": machine.next_expandable_layer() }));
            }
            "insights" => {
                let set = insights::select(
                    machine.root_selection(),
                    machine.active_selections(),
                    machine.visible_layers(),
                );
                let subtitle = insights::subtitle(
                    machine.root_selection(),
                    machine.active_selections(),
                    machine.visible_layers(),
                );
                println!("{}", json!({ "subtitle": subtitle, "set": set }));
            }
            "trail" => {
                println!("{}", json!({ "trail": trail.steps() }));
            }
            "state" => print_state(&machine),
            "reset" => machine.reset(),
            other => {
                eprintln!("unknown command: {}", other);
                continue;
            }
        }

        let events = machine.drain_events();
        if !events.is_empty() {
            println!("{}", json!({ "events": events }));
        }
    }
}
