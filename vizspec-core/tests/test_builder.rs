#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use vizspec_core::builder::{VizElement, VizLayer, VizMark, VizRepeat, VizSpecBuilder};
    use vizspec_core::diagnostics::{DiagnosticKind, Diagnostics};
    use vizspec_core::spec::channel::{FieldDef, PaintDef, PositionDef, TooltipDef};
    use vizspec_core::spec::chart::{Arrangement, LayerArrangement, NodeState, VizSpec};
    use vizspec_core::spec::encoding::{Channel, EncodingChannel, EncodingMap, OrderDef};
    use vizspec_core::spec::guide::AxisDef;
    use vizspec_core::spec::mark::{
        AnyMark, CompositeMarkDef, CompositeMarkType, MarkDef, MarkType,
    };
    use vizspec_core::spec::scale::{ScaleDef, ScaleType};
    use vizspec_core::spec::update::UpdateField;
    use vizspec_core::spec::values::{Multiplexed, TooltipValue};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn leaf(mark: MarkType) -> VizSpec {
        VizSpec::with_mark(mark)
    }

    fn populated_slots(spec: &VizSpec) -> Vec<Arrangement> {
        let mut slots = Vec::new();
        if spec.layer().is_some_and(|c| !c.is_empty()) {
            slots.push(Arrangement::Overlay);
        }
        if spec.hconcat().is_some_and(|c| !c.is_empty()) {
            slots.push(Arrangement::Horizontal);
        }
        if spec.vconcat().is_some_and(|c| !c.is_empty()) {
            slots.push(Arrangement::Vertical);
        }
        if spec.concat().is_some_and(|c| !c.is_empty()) {
            slots.push(Arrangement::Wrap);
        }
        if spec.repeated_spec().is_some() {
            slots.push(Arrangement::Repeat);
        }
        slots
    }

    #[rstest]
    #[case(vec![Arrangement::Horizontal, Arrangement::Vertical, Arrangement::Wrap])]
    #[case(vec![Arrangement::Repeat, Arrangement::Overlay, Arrangement::Horizontal])]
    #[case(vec![Arrangement::Wrap, Arrangement::Repeat, Arrangement::Repeat])]
    #[case(vec![Arrangement::Overlay, Arrangement::Overlay, Arrangement::Vertical, Arrangement::Repeat])]
    fn test_arrangement_exclusivity(#[case] sequence: Vec<Arrangement>) {
        let mut spec = VizSpec::new();
        spec.push_child(leaf(MarkType::Bar));
        spec.push_child(leaf(MarkType::Line));
        spec.push_child(leaf(MarkType::Point));

        for arrangement in sequence {
            spec.set_arrangement(arrangement);
            assert_eq!(populated_slots(&spec), vec![arrangement]);
            assert_eq!(spec.arrangement(), arrangement);
            assert_eq!(spec.children()[0], leaf(MarkType::Bar));
        }
    }

    #[test]
    fn test_arrangement_defaults_to_overlay() {
        let spec = VizSpec::new();
        assert_eq!(spec.arrangement(), Arrangement::Overlay);
        assert!(populated_slots(&spec).is_empty());
        assert_eq!(spec.state(), NodeState::Empty);
    }

    #[rstest]
    #[case(MarkDef::new(MarkType::Bar).into())]
    #[case(MarkDef::new(MarkType::Text).update(|m| &mut m.dx, 4.0).into())]
    #[case(MarkDef::new(MarkType::Area).update(|m| &mut m.opacity, 0.5).update(|m| &mut m.line, true).into())]
    #[case(CompositeMarkDef::new(CompositeMarkType::Errorbar).into())]
    #[case(CompositeMarkDef::new(CompositeMarkType::Boxplot).update(|m| &mut m.size, 14.0).into())]
    #[case(AnyMark::Composite(CompositeMarkType::Errorband))]
    #[case(AnyMark::Primitive(MarkType::Trail))]
    fn test_mark_compaction(#[case] mark: AnyMark) {
        let once = mark.clone().compact();
        assert_eq!(once.clone().compact(), once);
        assert_eq!(once.kind(), mark.kind());
        assert_eq!(once.expand(), mark.expand());
    }

    fn detail(fields: &[&str]) -> EncodingChannel {
        EncodingChannel::Detail(Multiplexed::List(
            fields.iter().map(|f| FieldDef::field(*f)).collect(),
        ))
    }

    fn order(fields: &[&str]) -> EncodingChannel {
        EncodingChannel::Order(OrderDef::Fields(Multiplexed::List(
            fields.iter().map(|f| FieldDef::field(*f)).collect(),
        )))
    }

    fn tooltip(fields: &[&str]) -> EncodingChannel {
        EncodingChannel::Tooltip(Multiplexed::List(
            fields.iter().map(|f| TooltipDef::field(*f)).collect(),
        ))
    }

    #[rstest]
    #[case(detail as fn(&[&str]) -> EncodingChannel)]
    #[case(order as fn(&[&str]) -> EncodingChannel)]
    #[case(tooltip as fn(&[&str]) -> EncodingChannel)]
    fn test_multiplex_merge_associativity(#[case] make: fn(&[&str]) -> EncodingChannel) {
        let mut diagnostics = Diagnostics::new();

        let mut stepwise = EncodingMap::new();
        stepwise.attach(make(&["a"]), &mut diagnostics);
        stepwise.attach(make(&["b"]), &mut diagnostics);

        let mut at_once = EncodingMap::new();
        at_once.attach(make(&["a", "b"]), &mut diagnostics);

        assert_eq!(stepwise, at_once);
        assert!(diagnostics.is_empty());
    }

    #[rstest]
    #[case(detail as fn(&[&str]) -> EncodingChannel)]
    #[case(order as fn(&[&str]) -> EncodingChannel)]
    #[case(tooltip as fn(&[&str]) -> EncodingChannel)]
    fn test_single_field_collapse(#[case] make: fn(&[&str]) -> EncodingChannel) {
        let mut encoding = EncodingMap::new();
        encoding.attach(make(&["a"]), &mut Diagnostics::new());

        let value = serde_json::to_value(&encoding).unwrap();
        let (_, entry) = value.as_object().unwrap().iter().next().unwrap();
        assert_eq!(entry, &json!({"field": "a"}));
    }

    #[test]
    fn test_repeat_child_truncation() {
        init_logger();
        let (spec, diagnostics) = VizSpecBuilder::new()
            .element(
                VizRepeat::new(Arrangement::Vertical, ["x", "y"])
                    .with(VizMark::new(MarkType::Bar))
                    .with(
                        VizLayer::new(LayerArrangement::Overlay)
                            .with(VizMark::new(MarkType::Line)),
                    )
                    .with(VizMark::new(MarkType::Point))
                    .with(VizMark::new(MarkType::Rule)),
            )
            .build();

        let repeat = spec.get_child(0).unwrap();
        assert_eq!(repeat.children(), &[leaf(MarkType::Bar)]);
        assert_eq!(
            diagnostics.kinds(),
            vec![DiagnosticKind::DroppedRepeatChildren {
                kept: 1,
                dropped: 3
            }]
        );
    }

    #[test]
    fn test_scenario_bar_with_two_positions() {
        init_logger();
        let (spec, diagnostics) = VizSpecBuilder::new()
            .element(
                VizMark::new(MarkDef::new(MarkType::Bar))
                    .with(EncodingChannel::X(PositionDef::field("a")))
                    .with(EncodingChannel::Y(PositionDef::field("b"))),
            )
            .build();

        assert!(diagnostics.is_empty());
        let view = spec.get_child(0).unwrap();
        assert_eq!(view.state(), NodeState::SingleView);
        assert_eq!(view.mark, Some(AnyMark::Primitive(MarkType::Bar)));
        assert_eq!(view.encoding.len(), 2);
        assert_eq!(view.encoding.channels(), vec![Channel::X, Channel::Y]);
        assert_eq!(
            serde_json::to_value(&view.encoding).unwrap(),
            json!({"x": {"field": "a"}, "y": {"field": "b"}})
        );
        assert!(view.children().is_empty());
    }

    #[test]
    fn test_scenario_tooltip_merge() {
        init_logger();
        let mut diagnostics = Diagnostics::new();
        let mut encoding = EncodingMap::new();
        encoding.attach(
            EncodingChannel::Tooltip(TooltipDef::field("a").into()),
            &mut diagnostics,
        );
        encoding.attach(tooltip(&["b", "c"]), &mut diagnostics);

        assert_eq!(
            serde_json::to_value(&encoding).unwrap(),
            json!({"tooltip": [{"field": "a"}, {"field": "b"}, {"field": "c"}]})
        );
        assert!(diagnostics.is_empty());

        // A single definition replaces the whole list
        encoding.attach(
            EncodingChannel::Tooltip(TooltipDef::value(TooltipValue::Null).into()),
            &mut diagnostics,
        );
        assert_eq!(
            serde_json::to_value(&encoding).unwrap(),
            json!({"tooltip": {"value": null}})
        );
        assert_eq!(
            diagnostics.kinds(),
            vec![DiagnosticKind::ReplacedEncoding {
                channel: Channel::Tooltip
            }]
        );
    }

    #[test]
    fn test_scenario_color_replaced() {
        init_logger();
        let (spec, diagnostics) = VizSpecBuilder::new()
            .element(
                VizMark::new(MarkType::Point)
                    .with(EncodingChannel::Color(PaintDef::value("steelblue")))
                    .with(EncodingChannel::Color(PaintDef::field("species"))),
            )
            .build();

        let view = spec.get_child(0).unwrap();
        assert_eq!(view.encoding.color, Some(PaintDef::field("species")));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.entries()[0].to_string(),
            "replacing existing encoding for channel `color` (at [0])"
        );
    }

    #[test]
    fn test_guides_attached_at_construction() {
        let x = PositionDef::field("date")
            .child(AxisDef::titled("Date"))
            .child(ScaleDef::of_type(ScaleType::Utc))
            .child(AxisDef::titled("When"));
        let (spec, _) = VizSpecBuilder::new()
            .element(VizMark::new(MarkType::Line).with(EncodingChannel::X(x)))
            .element(VizElement::width(300))
            .build();

        assert_eq!(
            serde_json::to_value(&spec.get_child(0).unwrap().encoding).unwrap(),
            json!({"x": {"field": "date", "scale": {"type": "utc"}, "axis": {"title": "When"}}})
        );
        assert_eq!(serde_json::to_value(&spec.width).unwrap(), json!(300.0));
    }
}
