#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        calls_superclass_method in super is OK
        "A"
        "B"
    }

    tests! {
        skips_own_override in super is OK
        "A"
        "B"
    }

    tests! {
        grandparent_lookup in super is OK
        "A"
    }

    tests! {
        without_superclass in super is ERR
        "[line 3:8 in tests/target/super/without_superclass.lbpl]: Cannot use 'super' in a class with no superclass."
    }

    tests! {
        outside_class in super is ERR
        "[line 1:0 in tests/target/super/outside_class.lbpl]: Cannot use 'super' outside of a class."
    }
}
