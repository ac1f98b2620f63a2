//! Basic usage example for rwmap
//!
//! This example demonstrates the map's API sequentially, then shares one map
//! across writer and reader threads and inspects the collected metrics.

use rwmap::{ConcurrentMap, MetricsCollector};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("rwmap Usage Example");
    println!("===================");

    // Basic single-threaded operations
    println!("\n1. Basic Operations:");
    let map: Arc<ConcurrentMap<String, i32>> = Arc::new(ConcurrentMap::new());

    map.insert("one".to_string(), 1);
    map.insert("two".to_string(), 2);
    println!("   Inserted: one=1, two=2 (len = {})", map.len());

    println!("   get(\"one\") = {:?}", map.get("one"));
    println!("   get(\"missing\") = {:?}", map.get("missing"));

    map.remove("one");
    println!("   After remove(\"one\"): contains = {}", map.contains_key("one"));

    map.clear();
    println!("   After clear: len = {}", map.len());

    // Concurrent writers with distinct keys
    println!("\n2. Concurrent Writers:");
    let writer_handles: Vec<_> = (0..4)
        .map(|writer_id| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("writer_{}_item_{}", writer_id, i);
                    map.insert(key, writer_id * 25 + i);
                }
                println!("   Writer {} finished", writer_id);
            })
        })
        .collect();

    for handle in writer_handles {
        handle.join().unwrap();
    }
    println!("   All writers done, len = {}", map.len());

    // Concurrent readers over the committed state
    println!("\n3. Concurrent Readers:");
    let reader_handles: Vec<_> = (0..4)
        .map(|reader_id| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let found = map
                    .keys()
                    .iter()
                    .filter(|key| map.get(key.as_str()).is_some())
                    .count();
                println!("   Reader {} found {} live keys", reader_id, found);
            })
        })
        .collect();

    for handle in reader_handles {
        handle.join().unwrap();
    }

    // Paired snapshot
    println!("\n4. Snapshot:");
    let mut entries = map.entries();
    entries.sort();
    println!("   First entry: {:?}", entries.first());
    println!("   Entry count: {}", entries.len());

    // Metrics
    println!("\n5. Metrics:");
    let metrics = map.metrics();
    println!("   Reads:      {}", metrics.read_operations);
    println!("   Writes:     {}", metrics.write_operations);
    println!("   Hit rate:   {:.1}%", metrics.hit_rate());
    println!("   Contention: {:.1}%", metrics.contention_rate());
    println!("   Avg op:     {:?}", metrics.avg_operation_time());
    println!("   Max op:     {:?}", metrics.max_operation_time());
}
