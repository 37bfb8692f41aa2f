use std::sync::Arc;
use std::thread;

use logica::{check, param, predicate, unbound, Compiler, Predicates};

fn main() {
    let compiler = Arc::new(Compiler::new(Predicates::standard()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let compiler = Arc::clone(&compiler);
            thread::spawn(move || {
                let min_age = 16_i64 + i64::from(i);
                let ast = vec![check(
                    "age",
                    predicate("gteq?", [param("num", min_age), unbound("input")]),
                )];
                let rules = compiler.compile(&ast);
                println!("Thread {i}: {rules:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
