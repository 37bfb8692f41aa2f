use logica::{check, check_keys, each, key, param, predicate, unbound, Compiler, Predicates};

fn main() {
    let compiler = Compiler::new(Predicates::standard());
    println!("{compiler}");

    let ast = vec![
        check(
            "age",
            key(
                "age",
                predicate("int?", []).and(predicate(
                    "gt?",
                    [param("num", 18_i64), unbound("input")],
                )),
            ),
        ),
        check_keys(
            "contact",
            key("email", predicate("filled?", [])).or(key("phone", predicate("filled?", []))),
            ["email", "phone"],
        ),
        key("roles", each(!predicate("empty?", []))),
    ];

    for node in &ast {
        println!("AST:  {node}");
    }

    let rules = compiler.compile(&ast).expect("failed to compile rules");
    for rule in &rules {
        println!("Rule: {rule}");
    }
}
