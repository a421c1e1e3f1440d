use crate::order::Order;

/// What a list index block does with the element it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Get,
    Set,
    Insert,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Get => "GET",
            Mode::Set => "SET",
            Mode::Insert => "INSERT",
        }
    }
}

/// Which element of the list an index block targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Where {
    First,
    Last,
    FromStart,
    FromEnd,
    Random,
}

impl Where {
    pub fn name(self) -> &'static str {
        match self {
            Where::First => "FIRST",
            Where::Last => "LAST",
            Where::FromStart => "FROM_START",
            Where::FromEnd => "FROM_END",
            Where::Random => "RANDOM",
        }
    }
}

/// A value socket on a block.
///
/// `Variable` and `Number` cover the two shadow inputs every block editor
/// has; `Code` carries a fragment already compiled by some other block
/// translator. Keeping "plugged variable" as its own variant lets the
/// set-at-random caching decision look at what the input *is* rather than
/// pattern-matching the emitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Variable(String),
    Number(String),
    Code { code: String, order: Order },
    Empty,
}

/// One list-operation block, carrying its sockets.
#[derive(Debug, Clone)]
pub enum ListOp {
    CreateEmpty,
    CreateWith {
        items: Vec<Input>,
    },
    Repeat {
        item: Input,
        times: Input,
    },
    Length {
        list: Input,
    },
    IsEmpty {
        list: Input,
    },
    IndexOf {
        list: Input,
        item: Input,
    },
    GetIndex {
        mode: Mode,
        location: Where,
        list: Input,
        at: Input,
    },
    SetIndex {
        mode: Mode,
        location: Where,
        list: Input,
        at: Input,
        to: Input,
    },
}
