use logica::{wire, Compiler, Predicates};

fn main() {
    let input = r#"
    [
      ["check", ["age", ["predicate", ["gt?", [["num", 18], ["input"]]]], null]],
      ["key", ["tags", ["each", ["predicate", ["str?", [["input"]]]]]]],
      ["predicate", ["shiny?", []]]
    ]
    "#;

    let compiler = Compiler::new(Predicates::standard());
    match compiler.compile_str(input) {
        Ok(rules) => {
            for rule in rules {
                println!("{rule}");
            }
        }
        // shiny? is not a registered predicate, so this branch runs.
        Err(err) => println!("Rejected: {err}"),
    }

    // Compile the well-formed part and render it back to its wire form.
    let nodes = wire::decode_str(input).expect("input is well-formed");
    let rules = compiler
        .compile(&nodes[..2])
        .expect("first two nodes use registered predicates");
    let round_trip: Vec<_> = rules.iter().map(|r| r.to_ast()).collect();
    println!("{}", wire::encode(&round_trip));
}
