use anyhow::{Context, Result};
use dyn_array::DynArray;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

fn print_array<T: Display>(label: &str, array: &DynArray<T>) {
    let elements = array
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{label}: [{elements}] (size={}, cap={})",
        array.len(),
        array.capacity()
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut array = DynArray::new();
    println!("=== Initialized ===");
    print_array("Empty array", &array);
    println!("Is empty? {}", array.is_empty());

    println!("\n=== Push ===");
    for i in 1..=5 {
        array.push(i * 10)?;
    }
    print_array("After pushing 10,20,30,40,50", &array);

    println!("\n=== Access ===");
    // SAFETY: The array holds five elements
    println!("Element at index 2: {}", unsafe { array.get_unchecked(2) });
    println!("Element at index 2 (checked): {}", array.get(2)?);
    array.set(2, 999)?;
    print_array("After setting index 2 to 999", &array);

    println!("\n=== Insert ===");
    array.insert(1, 888)?;
    print_array("After inserting 888 at index 1", &array);

    println!("\n=== Find ===");
    match array.find(&888) {
        Some(index) => println!("Found 888 at index {index}"),
        None => println!("888 not found"),
    }

    println!("\n=== Erase ===");
    array.erase(0)?;
    print_array("After erasing index 0", &array);

    println!("\n=== Pop ===");
    array.pop_back();
    print_array("After pop_back", &array);

    println!("\n=== Append ===");
    array.append_slice(&[100, 200, 300])?;
    print_array("After appending [100,200,300]", &array);

    println!("\n=== Clear ===");
    array.clear();
    print_array("After clear", &array);
    println!("Is empty? {}", array.is_empty());

    println!("\n=== Range view ===");
    array.append_slice(&[7, 8, 9])?;
    let view = array.iter();
    let line = view.map(ToString::to_string).collect::<Vec<_>>().join(" ");
    println!("{line}");

    println!("\n=== Out of bounds ===");
    if let Err(err) = array.get(100) {
        println!("Rejected: {err}");
    }
    if let Err(err) = array.insert(100, 1).context("inserting past the end") {
        println!("Rejected: {err:#}");
    }

    array.destroy();
    println!("\n=== Array destroyed ===");
    print_array("After destroy", &array);

    Ok(())
}
