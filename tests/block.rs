#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope in block is OK
        "1"
        "after"
    }

    tests! {
        nested in block is OK
        "3"
        "2"
        "1"
    }

    tests! {
        unterminated in block is ERR
        "[line 2:0 in tests/target/block/unterminated.lbpl]: Expected '}' at the end of a block."
    }
}
