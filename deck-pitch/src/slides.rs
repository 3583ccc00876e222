//! Per-slide content.
//!
//! Content slides share a 44 pt title at the top; everything else is grids of
//! archetype cards, bars, a comparison table, or loose text.

use deck_core::{
    BarChartSpec, BarRow, Block, CardContent, GridSpec, HAlign, Point, Rect, RemainderPlacement,
    Role, RunSpec, ShapeKind, ShapeSpec, Size, SlideDocument, TableContent, TableSpec, TextSpec,
    TextStyle,
};

/// All twelve slides, in order.
#[must_use]
pub fn all() -> Vec<SlideDocument> {
    vec![
        title(),
        problem(),
        solution(),
        secret_weapon(),
        competitive_advantage(),
        market_opportunity(),
        business_model(),
        traction(),
        use_of_funds(),
        why_now(),
        team(),
        closing(),
    ]
}

fn text(frame: Rect, text: &str, style: TextStyle) -> TextSpec {
    TextSpec::single(frame, text, style)
}

fn heading(title: &str) -> Block {
    Block::Text(text(
        Rect::from_xywh(0.5, 0.4, 9.0, 0.6),
        title,
        TextStyle::bold(44.0, Role::Primary),
    ))
}

fn subheading(line: &str, style: TextStyle, align: HAlign) -> Block {
    Block::Text(text(Rect::from_xywh(0.5, 1.1, 9.0, 0.4), line, style).align(align))
}

fn row_of(origin: Point, columns: usize, stride: Size, card: Size) -> GridSpec {
    GridSpec::new(origin, columns, stride).with_item_size(card)
}

/// Slide 1.
#[must_use]
pub fn title() -> SlideDocument {
    SlideDocument::bookend(
        "Title",
        vec![
            Block::Shape(ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(0.0, 0.0, 3.0, 5.625),
                Role::Secondary,
            )),
            Block::Text(text(
                Rect::from_xywh(3.2, 1.5, 6.5, 1.0),
                "StepTen.io",
                TextStyle::bold(64.0, Role::Primary),
            )),
            Block::Text(text(
                Rect::from_xywh(3.2, 2.7, 6.5, 1.0),
                "The World's Most Advanced\nAI-Powered SEO Content Engine",
                TextStyle::new(26.0, Role::OnDark),
            )),
            Block::Text(text(
                Rect::from_xywh(3.2, 4.3, 6.5, 0.5),
                "Raising $5M Series A",
                TextStyle::bold(22.0, Role::Secondary),
            )),
        ],
    )
}

/// Slide 2.
#[must_use]
pub fn problem() -> SlideDocument {
    let stats = [
        ("60%", "of AI-generated content\nis penalized by Google"),
        ("8+ hrs", "average time to create\none SEO-optimized article"),
        ("$89B", "content marketing market\nwith no complete solution"),
    ];
    SlideDocument::content(
        "The Problem",
        vec![
            heading("The Problem"),
            Block::Cards {
                grid: row_of(Point::new(0.5, 1.8), 3, Size::new(3.0, 3.0), Size::new(2.7, 3.0)),
                archetype: "stat-card".to_string(),
                remainder_archetype: None,
                items: stats
                    .iter()
                    .map(|(stat, caption)| CardContent::new().with("stat", *stat).with("caption", *caption))
                    .collect(),
            },
        ],
    )
}

/// Slide 3.
#[must_use]
pub fn solution() -> SlideDocument {
    let steps = [
        "1. SERP Analysis",
        "2. Research & Data",
        "3. Outline Generation",
        "4. Content Creation",
        "5. SEO Optimization",
        "6. Quality Check",
        "7. Internal Linking",
        "8. Publish & Track",
    ];
    SlideDocument::content(
        "Our Solution",
        vec![
            heading("Our Solution"),
            subheading(
                "8-Step AI Orchestration Pipeline with 5 Leading AI Models",
                TextStyle::new(20.0, Role::OnDark),
                HAlign::Left,
            ),
            Block::Grid {
                grid: row_of(Point::new(0.5, 2.0), 4, Size::new(2.3, 0.9), Size::new(2.1, 0.7)),
                archetype: "step-tile".to_string(),
                remainder_archetype: None,
                labels: steps.iter().map(|s| (*s).to_string()).collect(),
            },
            Block::Text(
                TextSpec::new(
                    Rect::from_xywh(0.5, 4.0, 9.0, 1.4),
                    vec![
                        RunSpec::new(
                            "Powered by 5 Leading AI Models\n",
                            TextStyle::bold(18.0, Role::Secondary),
                        ),
                        RunSpec::new(
                            "Claude • GPT-4 • Grok • Gemini • Perplexity",
                            TextStyle::new(22.0, Role::Primary),
                        ),
                    ],
                )
                .align(HAlign::Center)
                .wrap(),
            ),
        ],
    )
}

/// Slide 4. Eleven features: two full rows of four, then a row of three
/// highlighted tiles at fixed positions.
#[must_use]
pub fn secret_weapon() -> SlideDocument {
    let features = [
        "SERP Analysis",
        "Internal Linking",
        "Content Clusters",
        "NLP Entity Coverage",
        "Snippet Optimizer",
        "Freshness Detector",
        "27+ Languages",
        "A/B Testing",
        "Rank Tracking",
        "Score Predictor",
        "Autonomous AI Agent",
    ];
    let grid = row_of(Point::new(0.5, 1.8), 4, Size::new(2.3, 0.75), Size::new(2.1, 0.6))
        .with_remainder(
            8,
            RemainderPlacement::Row {
                origin: Point::new(1.9, 4.3),
                stride: 2.3,
            },
        );
    SlideDocument::content(
        "The Secret Weapon",
        vec![
            heading("The Secret Weapon"),
            subheading(
                "11 Advanced SEO Features No Competitor Can Match",
                TextStyle::new(20.0, Role::OnDark),
                HAlign::Left,
            ),
            Block::Grid {
                grid,
                archetype: "feature-tile".to_string(),
                remainder_archetype: Some("highlight-tile".to_string()),
                labels: features.iter().map(|s| (*s).to_string()).collect(),
            },
        ],
    )
}

/// Slide 5.
#[must_use]
pub fn competitive_advantage() -> SlideDocument {
    let content = TableContent::from_strs(
        &["Feature", "StepTen.io", "Jasper/Copy.ai", "SurferSEO", "Ahrefs"],
        &[
            &["Multi-AI Orchestration", "✓", "✗", "✗", "✗"],
            &["SERP Analysis", "✓", "✗", "✓", "✓"],
            &["Content Clusters", "✓", "✗", "✗", "✗"],
            &["Internal Linking AI", "✓", "✗", "✗", "✗"],
            &["27+ Languages", "✓", "Limited", "Limited", "✗"],
            &["Autonomous Agent", "✓", "✗", "✗", "✗"],
            &["Rank Tracking", "✓", "✗", "✓", "✓"],
            &["A/B Testing", "✓", "✗", "✗", "✗"],
        ],
    );
    SlideDocument::content(
        "Competitive Advantage",
        vec![
            heading("Competitive Advantage"),
            Block::Table {
                spec: TableSpec::new(Point::new(0.5, 1.3), vec![2.5, 1.5, 1.5, 1.5, 1.5])
                    .with_highlight(1, Some("✓")),
                content,
            },
        ],
    )
}

/// Slide 6.
#[must_use]
pub fn market_opportunity() -> SlideDocument {
    let markets = [
        ("TAM", "$89B", "Content Marketing", Role::Accent),
        ("SAM", "$24B", "SEO Software", Role::Primary),
        ("Target", "3 Segments", "Agencies • SaaS • Enterprise", Role::Secondary),
    ];
    SlideDocument::content(
        "Market Opportunity",
        vec![
            heading("Market Opportunity"),
            Block::Cards {
                grid: row_of(Point::new(1.0, 1.5), 3, Size::new(2.75, 2.5), Size::new(2.5, 2.5)),
                archetype: "market-circle".to_string(),
                remainder_archetype: None,
                items: markets
                    .iter()
                    .map(|(label, value, caption, role)| {
                        CardContent::new()
                            .with("label", *label)
                            .with("value", *value)
                            .with("caption", *caption)
                            .with_fill(*role)
                    })
                    .collect(),
            },
            Block::Text(
                TextSpec::new(
                    Rect::from_xywh(0.5, 4.5, 9.0, 0.8),
                    vec![
                        RunSpec::new(
                            "Primary Target Segments:\n",
                            TextStyle::bold(14.0, Role::MutedForeground),
                        ),
                        RunSpec::new(
                            "SEO Agencies (40%) • SaaS Companies (35%) • Enterprise Marketing Teams (25%)",
                            TextStyle::new(16.0, Role::OnDark),
                        ),
                    ],
                )
                .align(HAlign::Center),
            ),
        ],
    )
}

/// Slide 7.
#[must_use]
pub fn business_model() -> SlideDocument {
    let tiers = [
        ("Starter", "$299", Some("/mo"), "50 articles/mo\n5 projects\nBasic SEO", Role::Muted),
        (
            "Professional",
            "$999",
            Some("/mo"),
            "200 articles/mo\nUnlimited projects\nAdvanced SEO",
            Role::Accent,
        ),
        (
            "Enterprise",
            "Custom",
            None,
            "Unlimited articles\nWhite label\nDedicated support",
            Role::Secondary,
        ),
    ];
    let metrics = [("ACV", "$25K"), ("Gross Margin", "85%"), ("NDR", "120%")];

    SlideDocument::content(
        "Business Model",
        vec![
            heading("Business Model"),
            Block::Cards {
                grid: row_of(Point::new(0.5, 1.3), 3, Size::new(3.0, 2.5), Size::new(2.7, 2.5)),
                archetype: "pricing-card".to_string(),
                remainder_archetype: None,
                items: tiers
                    .iter()
                    .map(|(name, price, unit, features, role)| {
                        let card = CardContent::new()
                            .with("name", *name)
                            .with("price", *price)
                            .with("features", *features)
                            .with_fill(*role);
                        match unit {
                            Some(unit) => card.with("unit", *unit),
                            None => card,
                        }
                    })
                    .collect(),
            },
            Block::Cards {
                grid: row_of(Point::new(1.5, 4.2), 3, Size::new(2.5, 1.0), Size::new(2.0, 1.0)),
                archetype: "metric-chip".to_string(),
                remainder_archetype: None,
                items: metrics
                    .iter()
                    .map(|(label, value)| CardContent::new().with("label", *label).with("value", *value))
                    .collect(),
            },
        ],
    )
}

/// Slide 8.
#[must_use]
pub fn traction() -> SlideDocument {
    let metrics = [
        ("31", "Database Tables"),
        ("18", "API Endpoints"),
        ("15K+", "Lines of Code"),
        ("5", "AI Models Integrated"),
        ("27+", "Languages Supported"),
        ("11", "Advanced SEO Features"),
    ];
    SlideDocument::content(
        "Traction",
        vec![
            heading("Traction"),
            Block::Shape(ShapeSpec::new(
                ShapeKind::RoundedRectangle,
                Rect::from_xywh(0.5, 1.3, 9.0, 0.7),
                Role::Secondary,
            )),
            Block::Text(
                text(
                    Rect::from_xywh(0.7, 1.4, 8.6, 0.5),
                    "100% Production Ready",
                    TextStyle::bold(28.0, Role::OnDark),
                )
                .align(HAlign::Center)
                .middle(),
            ),
            Block::Cards {
                grid: row_of(Point::new(0.5, 2.5), 3, Size::new(3.1, 1.4), Size::new(2.8, 1.2)),
                archetype: "metric-card".to_string(),
                remainder_archetype: None,
                items: metrics
                    .iter()
                    .map(|(stat, label)| CardContent::new().with("stat", *stat).with("label", *label))
                    .collect(),
            },
        ],
    )
}

/// Slide 9.
#[must_use]
pub fn use_of_funds() -> SlideDocument {
    SlideDocument::content(
        "Use of Funds",
        vec![
            heading("Use of Funds"),
            subheading(
                "$5M Raising • 18 Month Runway",
                TextStyle::bold(20.0, Role::Secondary),
                HAlign::Center,
            ),
            Block::Bars {
                spec: BarChartSpec::default(),
                rows: vec![
                    BarRow::new("Product Development", 40.0, "$2.0M", Role::Primary),
                    BarRow::new("Sales & Marketing", 35.0, "$1.75M", Role::Secondary),
                    BarRow::new("AI Infrastructure", 15.0, "$750K", Role::Accent),
                    BarRow::new("Operations & Legal", 10.0, "$500K", Role::Muted),
                ],
            },
        ],
    )
}

/// Slide 10.
#[must_use]
pub fn why_now() -> SlideDocument {
    let reasons = [
        (
            "AI Convergence",
            "Multiple AI models now available with distinct strengths - orchestration is the new competitive advantage",
            Role::Primary,
        ),
        (
            "Google's AI Crackdown",
            "March 2024 update penalizing low-quality AI content - massive need for better solutions",
            Role::Secondary,
        ),
        (
            "Content Arms Race",
            "Companies need 10x more content to compete - manual processes can't scale",
            Role::Accent,
        ),
        (
            "Market Fragmentation",
            "Existing tools are point solutions - no one offers complete end-to-end workflow",
            Role::Muted,
        ),
    ];
    SlideDocument::content(
        "Why Now?",
        vec![
            heading("Why Now?"),
            Block::Cards {
                grid: row_of(Point::new(0.5, 1.5), 2, Size::new(4.7, 1.8), Size::new(4.4, 1.5)),
                archetype: "reason-card".to_string(),
                remainder_archetype: None,
                items: reasons
                    .iter()
                    .map(|(title, body, role)| {
                        CardContent::new()
                            .with("title", *title)
                            .with("body", *body)
                            .with_fill(*role)
                    })
                    .collect(),
            },
        ],
    )
}

/// Slide 11.
#[must_use]
pub fn team() -> SlideDocument {
    SlideDocument::content(
        "The Team",
        vec![
            heading("The Team"),
            Block::Card {
                archetype: "profile-card".to_string(),
                origin: Point::new(2.0, 1.5),
                content: CardContent::new()
                    .with("initials", "ST")
                    .with("name", "Stephen Ten")
                    .with("role", "Founder & CEO")
                    .with("bio", "20+ years experience in SEO, AI, and SaaS development"),
            },
        ],
    )
}

/// Slide 12.
#[must_use]
pub fn closing() -> SlideDocument {
    SlideDocument::bookend(
        "Closing",
        vec![
            Block::Shape(ShapeSpec::new(
                ShapeKind::Rectangle,
                Rect::from_xywh(7.0, 0.0, 3.0, 5.625),
                Role::Primary,
            )),
            Block::Text(text(
                Rect::from_xywh(0.5, 1.5, 6.0, 1.0),
                "Join Us",
                TextStyle::bold(56.0, Role::Primary),
            )),
            Block::Text(
                text(
                    Rect::from_xywh(0.5, 2.5, 6.0, 0.8),
                    "Help us build the future of\nAI-powered content creation",
                    TextStyle::new(24.0, Role::OnDark),
                )
                .wrap(),
            ),
            Block::Text(text(
                Rect::from_xywh(0.5, 3.6, 6.0, 0.6),
                "Raising $5M Series A",
                TextStyle::bold(32.0, Role::Secondary),
            )),
            Block::Text(TextSpec::new(
                Rect::from_xywh(0.5, 4.5, 6.0, 0.8),
                vec![
                    RunSpec::new("stephen@stepten.io\n", TextStyle::new(18.0, Role::OnDark)),
                    RunSpec::new("www.stepten.io", TextStyle::new(18.0, Role::Primary)),
                ],
            )),
        ],
    )
}
