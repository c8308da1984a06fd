use nodle_dataflow::{MemberRef, Node, NodeGraph};

fn main() -> nodle_dataflow::Result<()> {
    env_logger::init();

    let mut graph = NodeGraph::new();

    // Create nodes
    let mut source = Node::new("Constant");
    source.add_member("out")?;
    let source = graph.add_node(source);
    graph.set_value(&MemberRef::new(source, "out"), 3.0)?;

    let x = graph.add_variable("x")?;

    // Connect them
    let wire = graph.connect(MemberRef::new(source, "out"), MemberRef::new(x, "value"))?;
    println!("Wire {} is {:?}", wire, graph.wire(wire)?.state());

    graph.transmit(wire)?;
    println!("Variable label: {}", graph.variable(x)?.label());

    graph.remove_node(source)?;
    println!(
        "After removing the source: {} nodes, wire {} is {:?}",
        graph.node_count(),
        wire,
        graph.wire(wire)?.state()
    );

    Ok(())
}
