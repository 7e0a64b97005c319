#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        initializer_runs in constructor is OK
        "42"
    }

    tests! {
        returns_instance in constructor is OK
        "<instance P>"
    }

    tests! {
        early_return_yields_instance in constructor is OK
        "<instance P>"
    }

    // Calling init on an existing instance re-runs it and yields `this`.
    tests! {
        explicit_init_call in constructor is OK
        "2"
    }

    tests! {
        arity_comes_from_init in constructor is ERR
        "[line 6:1 in tests/target/constructor/arity_comes_from_init.lbpl]: Wrong number of arguments."
    }

    tests! {
        return_value_from_init in constructor is ERR
        "[line 3:8 in tests/target/constructor/return_value_from_init.lbpl]: Cannot return a value from an initializer."
    }
}
