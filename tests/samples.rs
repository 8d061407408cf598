//! Parser tests over the sample documents in docs/samples
//!
//! Each sample covers one area of the syntax; the assertions pin down the full shape of
//! the resulting tree.

use ftl::ftl::ast::CommentLevel;
use ftl::ftl::testing::assert_resource;
use ftl::parse_resource;
use std::fs;

fn read_sample(name: &str) -> String {
    fs::read_to_string(format!("docs/samples/{}", name)).expect("Failed to read sample document")
}

#[test]
fn test_000_messages() {
    let resource = parse_resource(&read_sample("000-messages.ftl"));
    assert_resource(&resource)
        .entry_count(4)
        .junk_count(0)
        .entry(0, |e| {
            e.assert_message().id("hello").value_text("Hello, world!");
        })
        .entry(1, |e| {
            e.assert_message().id("welcome").value(|p| {
                p.element_count(3)
                    .text(0, "Welcome, ")
                    .placeable(1, |x| {
                        x.variable("user");
                    })
                    .text(2, "!");
            });
        })
        .entry(2, |e| {
            e.assert_term().id("brand-name").value_text("Firefox");
        })
        .entry(3, |e| {
            e.assert_message().id("about").value(|p| {
                p.element_count(2).placeable(1, |x| {
                    x.term_reference("brand-name", None);
                });
            });
        });
}

#[test]
fn test_010_multiline() {
    let resource = parse_resource(&read_sample("010-multiline.ftl"));
    assert_resource(&resource)
        .entry_count(4)
        .entry(0, |e| {
            e.assert_message().value_text("Text on one line");
        })
        .entry(1, |e| {
            e.assert_message().id("block").value(|p| {
                p.element_count(2)
                    .text(0, "First line")
                    .text(1, "\nsecond line");
            });
        })
        .entry(2, |e| {
            e.assert_message()
                .id("inline-start")
                .value_text("Starts here\nand continues");
        })
        .entry(3, |e| {
            e.assert_message()
                .id("indented")
                .value_text("Base\n    deeper\nback\n\n    after blank");
        });
}

#[test]
fn test_020_attributes() {
    let resource = parse_resource(&read_sample("020-attributes.ftl"));
    assert_resource(&resource)
        .entry_count(3)
        .entry(0, |e| {
            e.assert_message()
                .id("login-input")
                .value_text("Predefined value")
                .attribute_count(3)
                .attribute(0, |a| {
                    a.id("placeholder").value_text("email@example.com");
                })
                .attribute(1, |a| {
                    a.id("aria-label").value_text("Login input value");
                })
                .attribute(2, |a| {
                    a.id("title").value_text("Type your login email");
                });
        })
        .entry(1, |e| {
            e.assert_term()
                .id("brand")
                .attribute_count(1)
                .attribute(0, |a| {
                    a.id("gender").value_text("masculine");
                });
        })
        .entry(2, |e| {
            e.assert_message()
                .id("empty-value")
                .no_value()
                .attribute_count(1);
        });
}

#[test]
fn test_030_comments() {
    let resource = parse_resource(&read_sample("030-comments.ftl"));
    assert_resource(&resource)
        .entry_count(6)
        .entry(0, |e| {
            e.assert_comment()
                .level(CommentLevel::Resource)
                .content("Resource comment for the whole file");
        })
        .entry(1, |e| {
            e.assert_comment()
                .level(CommentLevel::Group)
                .content("Group: Navigation");
        })
        .entry(2, |e| {
            e.assert_message()
                .id("nav-home")
                .comment("Documents the next message\nacross two lines");
        })
        .entry(3, |e| {
            e.assert_comment()
                .level(CommentLevel::Comment)
                .content("Standalone, blank line follows");
        })
        .entry(4, |e| {
            e.assert_message().id("nav-back").no_comment();
        })
        .entry(5, |e| {
            e.assert_message()
                .id("nav-forward")
                .comment("\nEmpty first line above");
        });
}

#[test]
fn test_040_select() {
    let resource = parse_resource(&read_sample("040-select.ftl"));
    assert_resource(&resource)
        .entry_count(4)
        .junk_count(0)
        .entry(0, |e| {
            e.assert_message().id("emails").value(|p| {
                p.element_count(1).placeable(0, |x| {
                    x.select(|s| {
                        s.selector(|sel| {
                            sel.variable("unreadEmails");
                        })
                        .variant_count(2)
                        .default_key("other")
                        .variant(0, |v| {
                            v.key("one")
                                .is_default(false)
                                .value_text("You have one unread email.");
                        })
                        .variant(1, |v| {
                            v.is_default(true)
                                .value_text("You have { $unreadEmails } unread emails.");
                        });
                    });
                });
            });
        })
        .entry(1, |e| {
            e.assert_message().id("your-score").value(|p| {
                p.placeable(0, |x| {
                    x.select(|s| {
                        s.selector(|sel| {
                            sel.function("NUMBER").arguments(|args| {
                                args.positional_count(1).named("minimumFractionDigits", |v| {
                                    v.number("1");
                                });
                            });
                        })
                        .variant(0, |v| {
                            v.key("0.0");
                        });
                    });
                });
            });
        })
        .entry(2, |e| {
            e.assert_term().id("thing").value(|p| {
                p.placeable(0, |x| {
                    x.select(|s| {
                        s.default_key("one").variant(1, |v| {
                            v.key("other").value_text("things");
                        });
                    });
                });
            });
        })
        .entry(3, |e| {
            e.assert_message().id("gender").value(|p| {
                p.placeable(0, |x| {
                    x.select(|s| {
                        s.selector(|sel| {
                            sel.term_reference("brand", Some("gender"));
                        })
                        .default_key("other");
                    });
                });
            });
        });
}

#[test]
fn test_050_calls() {
    let resource = parse_resource(&read_sample("050-calls.ftl"));
    assert_resource(&resource)
        .entry_count(7)
        .junk_count(0)
        .entry(0, |e| {
            e.assert_message().value(|p| {
                p.placeable(1, |x| {
                    x.function("DATETIME").arguments(|args| {
                        args.positional_count(1)
                            .named_count(2)
                            .positional(0, |v| {
                                v.variable("now");
                            })
                            .named("month", |v| {
                                v.string("long");
                            })
                            .named("day", |v| {
                                v.string("numeric");
                            });
                    });
                });
            });
        })
        .entry(2, |e| {
            e.assert_message().id("positional").value(|p| {
                p.placeable(0, |x| {
                    x.function("FUN").arguments(|args| {
                        args.positional_count(5)
                            .named_count(0)
                            .positional(0, |v| {
                                v.number("1");
                            })
                            .positional(1, |v| {
                                v.string("two");
                            })
                            .positional(2, |v| {
                                v.variable("three");
                            })
                            .positional(3, |v| {
                                v.term_reference("four", None);
                            })
                            .positional(4, |v| {
                                v.message_reference("five", None);
                            });
                    });
                });
            });
        })
        .entry(3, |e| {
            e.assert_message().id("no-args").value(|p| {
                p.placeable(0, |x| {
                    x.function("NOW").arguments(|args| {
                        args.positional_count(0).named_count(0);
                    });
                });
            });
        })
        .entry(4, |e| {
            e.assert_message().id("nested").value(|p| {
                p.placeable(0, |x| {
                    x.function("FUN").arguments(|args| {
                        args.positional(0, |v| {
                            v.function("OTHER");
                        })
                        .positional(1, |v| {
                            v.placeable(|inner| {
                                inner.string("literal");
                            });
                        });
                    });
                });
            });
        })
        .entry(5, |e| {
            e.assert_message().id("trailing").value(|p| {
                p.placeable(0, |x| {
                    x.arguments(|args| {
                        args.positional_count(2);
                    });
                });
            });
        })
        .entry(6, |e| {
            e.assert_message().id("term-call").value(|p| {
                p.placeable(0, |x| {
                    x.term_reference("brand", None).arguments(|args| {
                        args.named("case", |v| {
                            v.string("nominative");
                        });
                    });
                });
            });
        });
}

#[test]
fn test_060_junk() {
    let resource = parse_resource(&read_sample("060-junk.ftl"));
    assert_resource(&resource)
        .entry_count(8)
        .junk_count(5)
        .entry(0, |e| {
            e.assert_message().id("valid-one");
        })
        .entry(1, |e| {
            e.assert_junk()
                .content("broken = { $var\n")
                .error_code("syntax")
                .error_contains("expected `}`");
        })
        .entry(2, |e| {
            e.assert_junk()
                .content("still-broken = missing brace }\n")
                .error_code("syntax");
        })
        .entry(3, |e| {
            e.assert_message().id("valid-two").value_text("Also fine");
        })
        .entry(4, |e| {
            e.assert_junk()
                .content("!garbage line\n")
                .error_code("unfinished-line");
        })
        .entry(5, |e| {
            e.assert_junk()
                .content_starts_with("bad-escape")
                .error_code("invalid-escape");
        })
        .entry(6, |e| {
            e.assert_junk()
                .content("-no-value =\n")
                .error_contains("a value for the term");
        })
        .entry(7, |e| {
            e.assert_message().id("valid-three");
        });
}
