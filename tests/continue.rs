#[macro_use]
mod common;

#[cfg(test)]
mod _continue {
    tests! {
        skips_iteration in continue is OK
        "1"
        "3"
        "4"
        "5"
    }

    tests! {
        outside_loop in continue is ERR
        "[line 1:0 in tests/target/continue/outside_loop.lbpl]: Cannot use 'continue' outside of a loop."
    }
}
