use crate::block::{Input, ListOp, Mode, Where};
use crate::generator::ArduinoGenerator;
use crate::lists::{emit, Emitted};
use crate::order::Order;
use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};

/// Compiles a JSON block-program description into a full sketch.
///
/// The description carries declared `variables`/`lists` names and a `setup`
/// array of statement blocks. Value sockets are `{"var": name}`,
/// `{"num": n}`, `{"code": text, "order": NAME}` for fragments produced by
/// other block families, or a nested list block compiled recursively.
pub fn compile_program(source: &str) -> Result<String> {
    let root: Value = serde_json::from_str(source).context("Invalid program JSON.")?;
    let obj = root
        .as_object()
        .ok_or_else(|| anyhow!("Program root must be a JSON object."))?;

    let mut gen = ArduinoGenerator::new();
    for key in ["variables", "lists"] {
        if let Some(arr) = obj.get(key).and_then(Value::as_array) {
            for entry in arr {
                let name = entry
                    .as_str()
                    .ok_or_else(|| anyhow!("'{}' entries must be strings.", key))?;
                gen.reserve_name(name);
            }
        }
    }

    let mut body = String::new();
    if let Some(arr) = obj.get("setup").and_then(Value::as_array) {
        for node in arr {
            let op = block_to_op(&mut gen, node)?;
            match emit(&mut gen, &op)? {
                Emitted::Statement(code) => body.push_str(&code),
                Emitted::Expression(_) => bail!(
                    "Block '{}' is a reporter and cannot stand alone as a statement.",
                    opcode_of(node)
                ),
            }
        }
    }
    Ok(gen.render_sketch(&body))
}

fn block_to_op(gen: &mut ArduinoGenerator, node: &Value) -> Result<ListOp> {
    let obj = node
        .as_object()
        .ok_or_else(|| anyhow!("Block entries must be JSON objects."))?;
    let opcode = obj
        .get("block")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Block object missing 'block' opcode."))?;

    let op = match opcode {
        "lists_create_empty" => ListOp::CreateEmpty,
        "lists_create_with" => {
            let mut items = Vec::new();
            if let Some(arr) = obj.get("items").and_then(Value::as_array) {
                for item in arr {
                    items.push(input_from_json(gen, Some(item))?);
                }
            }
            ListOp::CreateWith { items }
        }
        "lists_repeat" => ListOp::Repeat {
            item: input_from_json(gen, obj.get("item"))?,
            times: input_from_json(gen, obj.get("times"))?,
        },
        "lists_length" => ListOp::Length {
            list: input_from_json(gen, obj.get("list"))?,
        },
        "lists_isEmpty" => ListOp::IsEmpty {
            list: input_from_json(gen, obj.get("list"))?,
        },
        "lists_indexOf" => ListOp::IndexOf {
            list: input_from_json(gen, obj.get("list"))?,
            item: input_from_json(gen, obj.get("item"))?,
        },
        "lists_getIndex" => ListOp::GetIndex {
            mode: mode_field(obj)?,
            location: where_field(obj)?,
            list: input_from_json(gen, obj.get("list"))?,
            at: input_from_json(gen, obj.get("at"))?,
        },
        "lists_setIndex" => ListOp::SetIndex {
            mode: mode_field(obj)?,
            location: where_field(obj)?,
            list: input_from_json(gen, obj.get("list"))?,
            at: input_from_json(gen, obj.get("at"))?,
            to: input_from_json(gen, obj.get("to"))?,
        },
        other => bail!("Unknown block '{}'.", other),
    };
    Ok(op)
}

fn input_from_json(gen: &mut ArduinoGenerator, node: Option<&Value>) -> Result<Input> {
    let Some(node) = node else {
        return Ok(Input::Empty);
    };
    if node.is_null() {
        return Ok(Input::Empty);
    }
    let obj = node
        .as_object()
        .ok_or_else(|| anyhow!("Value sockets must be JSON objects."))?;

    if let Some(name) = obj.get("var").and_then(Value::as_str) {
        return Ok(Input::Variable(name.to_string()));
    }
    if let Some(num) = obj.get("num") {
        let Some(num) = num.as_i64().map(|n| n.to_string()).or_else(|| {
            num.as_f64().map(|f| f.to_string())
        }) else {
            bail!("'num' sockets must carry a JSON number.");
        };
        return Ok(Input::Number(num));
    }
    if let Some(code) = obj.get("code").and_then(Value::as_str) {
        let order = order_field(obj)?;
        return Ok(Input::Code {
            code: code.to_string(),
            order,
        });
    }
    if obj.contains_key("block") {
        // A nested list block: compile it now and plug the fragment in.
        let op = block_to_op(gen, node)?;
        return match emit(gen, &op)? {
            Emitted::Expression(fragment) => Ok(Input::Code {
                code: fragment.code,
                order: fragment.order,
            }),
            Emitted::Statement(_) => bail!(
                "Block '{}' is a command block and cannot be plugged into a value socket.",
                opcode_of(node)
            ),
        };
    }
    bail!("Unrecognized value socket: expected 'var', 'num', 'code', or a nested block.");
}

fn mode_field(obj: &Map<String, Value>) -> Result<Mode> {
    // Old saves carry no MODE field; Blockly defaults those to GET.
    let Some(raw) = obj.get("mode").and_then(Value::as_str) else {
        return Ok(Mode::Get);
    };
    let mode = match raw {
        "GET" => Mode::Get,
        "SET" => Mode::Set,
        "INSERT" => Mode::Insert,
        other => bail!("Unknown mode '{}'.", other),
    };
    Ok(mode)
}

fn where_field(obj: &Map<String, Value>) -> Result<Where> {
    let Some(raw) = obj.get("where").and_then(Value::as_str) else {
        return Ok(Where::FromStart);
    };
    let location = match raw {
        "FIRST" => Where::First,
        "LAST" => Where::Last,
        "FROM_START" => Where::FromStart,
        "FROM_END" => Where::FromEnd,
        "RANDOM" => Where::Random,
        other => bail!("Unknown location '{}'.", other),
    };
    Ok(location)
}

fn order_field(obj: &Map<String, Value>) -> Result<Order> {
    let Some(raw) = obj.get("order").and_then(Value::as_str) else {
        // Unannotated foreign code binds loosest, so it always gets parens
        // when embedded in a tighter context.
        return Ok(Order::None);
    };
    Order::from_name(raw).ok_or_else(|| anyhow!("Unknown order '{}'.", raw))
}

fn opcode_of(node: &Value) -> &str {
    node.get("block").and_then(Value::as_str).unwrap_or("?")
}
