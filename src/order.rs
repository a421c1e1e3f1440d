/// Binding strength of an expression's outermost operator, loosest first.
///
/// A fragment whose order is `>=` the minimum required by the surrounding
/// context can be inlined bare; anything weaker has to be wrapped in
/// parentheses by the consumer. Emitters must report the true order of what
/// they produce: an over-tight report makes the generated code parse
/// differently than intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Order {
    None,
    Comma,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Member,
    FunctionCall,
    Atomic,
}

impl Order {
    pub fn name(self) -> &'static str {
        match self {
            Order::None => "NONE",
            Order::Comma => "COMMA",
            Order::Assignment => "ASSIGNMENT",
            Order::Conditional => "CONDITIONAL",
            Order::LogicalOr => "LOGICAL_OR",
            Order::LogicalAnd => "LOGICAL_AND",
            Order::BitwiseOr => "BITWISE_OR",
            Order::BitwiseXor => "BITWISE_XOR",
            Order::BitwiseAnd => "BITWISE_AND",
            Order::Equality => "EQUALITY",
            Order::Relational => "RELATIONAL",
            Order::Shift => "SHIFT",
            Order::Additive => "ADDITIVE",
            Order::Multiplicative => "MULTIPLICATIVE",
            Order::Unary => "UNARY",
            Order::Member => "MEMBER",
            Order::FunctionCall => "FUNCTION_CALL",
            Order::Atomic => "ATOMIC",
        }
    }

    pub fn from_name(name: &str) -> Option<Order> {
        let order = match name {
            "NONE" => Order::None,
            "COMMA" => Order::Comma,
            "ASSIGNMENT" => Order::Assignment,
            "CONDITIONAL" => Order::Conditional,
            "LOGICAL_OR" => Order::LogicalOr,
            "LOGICAL_AND" => Order::LogicalAnd,
            "BITWISE_OR" => Order::BitwiseOr,
            "BITWISE_XOR" => Order::BitwiseXor,
            "BITWISE_AND" => Order::BitwiseAnd,
            "EQUALITY" => Order::Equality,
            "RELATIONAL" => Order::Relational,
            "SHIFT" => Order::Shift,
            "ADDITIVE" => Order::Additive,
            "MULTIPLICATIVE" => Order::Multiplicative,
            "UNARY" => Order::Unary,
            "FUNCTION_CALL" => Order::FunctionCall,
            "MEMBER" => Order::Member,
            "ATOMIC" => Order::Atomic,
            _ => return None,
        };
        Some(order)
    }
}

/// A unit of generated expression text plus the order needed to embed it
/// safely into a larger expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub code: String,
    pub order: Order,
}

impl Fragment {
    pub fn new(code: impl Into<String>, order: Order) -> Self {
        Self {
            code: code.into(),
            order,
        }
    }
}
