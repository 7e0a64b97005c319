#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    // Closures capture the variable itself, not a copy of its value.
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        capture_parameter in closure is OK
        "param"
    }

    tests! {
        independent_closures in closure is OK
        "1"
        "2"
        "1"
    }
}
