use crate::block::{Input, ListOp, Mode, Where};
use crate::error::EmitError;
use crate::generator::{integer_literal_value, ArduinoGenerator, FUNCTION_NAME_PLACEHOLDER};
use crate::order::{Fragment, Order};

/// What one block compiles to: reporters produce an embeddable fragment,
/// command blocks a `;`-terminated statement sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Expression(Fragment),
    Statement(String),
}

/// Create an empty list.
pub fn list_create_empty(_gen: &mut ArduinoGenerator) -> Fragment {
    Fragment::new("{}", Order::Atomic)
}

/// Create a list with any number of elements of any type.
pub fn list_create_with(gen: &mut ArduinoGenerator, items: &[Input]) -> Fragment {
    let rendered = items
        .iter()
        .map(|item| {
            gen.value_to_code(item, Order::Comma)
                .unwrap_or_else(|| "None".to_string())
        })
        .collect::<Vec<_>>()
        .join(", ");
    Fragment::new(format!("{{{}}}", rendered), Order::Atomic)
}

/// Create a list with one element repeated.
///
/// The generated helper returns a pointer to a function-local array; the
/// dangling result is a quirk inherited from the upstream Blockly Arduino
/// generator, kept for output parity (see DESIGN.md).
pub fn list_repeat(gen: &mut ArduinoGenerator, item: &Input, times: &Input) -> Fragment {
    let signature = format!("int *{}(int value, int n) {{", FUNCTION_NAME_PLACEHOLDER);
    let function_name = gen.provide_function(
        "lists_repeat",
        &[
            signature.as_str(),
            "  int array[n];",
            "  for (int i = 0; i < n; i++) {",
            "    array[i] = value;",
            "  }",
            "  return array;",
            "}",
        ],
    );
    let item = gen
        .value_to_code(item, Order::Comma)
        .unwrap_or_else(|| "null".to_string());
    let times = gen
        .value_to_code(times, Order::Comma)
        .unwrap_or_else(|| "0".to_string());
    Fragment::new(
        format!("{}({}, {})", function_name, item, times),
        Order::FunctionCall,
    )
}

/// String or array length.
///
/// `sizeof` yields a byte count, not an element count, for elements wider
/// than a byte; callers inherit that quirk knowingly.
pub fn list_length(gen: &mut ArduinoGenerator, list: &Input) -> Fragment {
    let list = gen
        .value_to_code(list, Order::None)
        .unwrap_or_else(|| "{}".to_string());
    Fragment::new(format!("sizeof({})", list), Order::FunctionCall)
}

/// Get element at index.
pub fn list_get_index(
    gen: &mut ArduinoGenerator,
    mode: Mode,
    location: Where,
    list: &Input,
    at: &Input,
) -> Result<Fragment, EmitError> {
    // The index lands right of a subtraction in the LAST/FROM_END shapes;
    // anything looser than a multiplicative operand needs parens there.
    let at = gen
        .value_to_code(at, Order::Multiplicative)
        .unwrap_or_else(|| "1".to_string());
    let list = gen
        .value_to_code(list, Order::Member)
        .unwrap_or_else(|| "[]".to_string());

    match (location, mode) {
        (Where::First, Mode::Get) => Ok(Fragment::new(format!("{}[0]", list), Order::Member)),
        (Where::Last, Mode::Get) => Ok(Fragment::new(
            format!("{}[sizeof({})/sizeof(int) - 1]", list, list),
            Order::Member,
        )),
        (Where::FromStart, Mode::Get) => {
            let at = decrement_index(&at);
            Ok(Fragment::new(format!("{}[{}]", list, at), Order::Member))
        }
        (Where::FromEnd, Mode::Get) => Ok(Fragment::new(
            format!("{}[sizeof({})/sizeof(int) - {}]", list, list, at),
            Order::Member,
        )),
        (Where::Random, Mode::Get) => Ok(Fragment::new(
            format!("{}[random(0, sizeof({})/sizeof(int))]", list, list),
            Order::FunctionCall,
        )),
        _ => Err(EmitError::UnhandledCombination {
            block: "lists_getIndex",
            mode,
            location,
        }),
    }
}

/// Set element at index. Returns a complete statement sequence.
pub fn list_set_index(
    gen: &mut ArduinoGenerator,
    mode: Mode,
    location: Where,
    list: &Input,
    at: &Input,
    to: &Input,
) -> Result<String, EmitError> {
    let mut list_code = gen
        .value_to_code(list, Order::Member)
        .unwrap_or_else(|| "[]".to_string());
    let at = gen
        .value_to_code(at, Order::Multiplicative)
        .unwrap_or_else(|| "1".to_string());
    let value = gen
        .value_to_code(to, Order::None)
        .unwrap_or_else(|| "None".to_string());

    match (location, mode) {
        (Where::First, Mode::Set) => Ok(format!("{}[0] = {};\n", list_code, value)),
        (Where::Last, Mode::Set) => Ok(format!(
            "{}[sizeof({})/sizeof(int) - 1] = {};\n",
            list_code, list_code, value
        )),
        (Where::FromStart, Mode::Set) => {
            let at = decrement_index(&at);
            Ok(format!("{}[{}] = {};\n", list_code, at, value))
        }
        (Where::FromEnd, Mode::Set) => Ok(format!(
            "{}[sizeof({})/sizeof(int) - {}] = {};\n",
            list_code, list_code, at, value
        )),
        (Where::Random, Mode::Set) => {
            let mut code = String::new();
            // Cache anything that is not a plugged variable: the list
            // expression is referenced twice below, and re-evaluating a call
            // or a freshly built value would repeat its side effects.
            if !matches!(list, Input::Variable(_)) {
                let list_var = gen.distinct_name("tmp_list");
                code.push_str(&format!("{} = {};\n", list_var, list_code));
                list_code = list_var;
            }
            let index_var = gen.distinct_name("tmp_x");
            code.push_str(&format!(
                "{} = random(0, sizeof({})/sizeof(int));\n",
                index_var, list_code
            ));
            code.push_str(&format!("{}[{}] = {};\n", list_code, index_var, value));
            Ok(code)
        }
        _ => Err(EmitError::UnhandledCombination {
            block: "lists_setIndex",
            mode,
            location,
        }),
    }
}

// Blockly indices are one-based. A literal index is folded right here; a
// dynamic one gets the decrement emitted into the generated code.
fn decrement_index(at: &str) -> String {
    match integer_literal_value(at) {
        Some(n) => (n - 1).to_string(),
        None => format!("int({} - 1)", at),
    }
}

/// Compiles one list block, routing reporters and command blocks to their
/// emitters.
pub fn emit(gen: &mut ArduinoGenerator, op: &ListOp) -> Result<Emitted, EmitError> {
    match op {
        ListOp::CreateEmpty => Ok(Emitted::Expression(list_create_empty(gen))),
        ListOp::CreateWith { items } => Ok(Emitted::Expression(list_create_with(gen, items))),
        ListOp::Repeat { item, times } => Ok(Emitted::Expression(list_repeat(gen, item, times))),
        ListOp::Length { list } => Ok(Emitted::Expression(list_length(gen, list))),
        ListOp::IsEmpty { .. } => Err(EmitError::NoGenerator {
            block: "lists_isEmpty",
        }),
        ListOp::IndexOf { .. } => Err(EmitError::NoGenerator {
            block: "lists_indexOf",
        }),
        ListOp::GetIndex {
            mode,
            location,
            list,
            at,
        } => Ok(Emitted::Expression(list_get_index(
            gen, *mode, *location, list, at,
        )?)),
        ListOp::SetIndex {
            mode,
            location,
            list,
            at,
            to,
        } => Ok(Emitted::Statement(list_set_index(
            gen, *mode, *location, list, at, to,
        )?)),
    }
}
