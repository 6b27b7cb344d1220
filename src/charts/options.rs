use serde_json::{json, Value};

const TITLE_COLOR: &str = "#374151";
const NAVY: &str = "#1e3a8a";
const AMBER: &str = "#f59e0b";

struct LineSeries {
    name: &'static str,
    values: [u32; 6],
    color: &'static str,
    area: &'static str,
}

struct Slice {
    name: &'static str,
    share: u32,
    color: &'static str,
}

const EXCHANGE_YEARS: [&str; 6] = ["2020", "2021", "2022", "2023", "2024", "2025"];

const EXCHANGE_SERIES: [LineSeries; 2] = [
    LineSeries {
        name: "Chinese Students in Australia",
        values: [28_000, 15_000, 22_000, 31_000, 35_000, 38_000],
        color: NAVY,
        area: "rgba(30, 58, 138, 0.1)",
    },
    LineSeries {
        name: "Australian Students in China",
        values: [4_500, 2_000, 3_500, 6_000, 8_000, 9_500],
        color: AMBER,
        area: "rgba(245, 158, 11, 0.1)",
    },
];

const PROGRAM_YEARS: [&str; 6] = ["2004", "2008", "2012", "2016", "2020", "2024"];
const PROGRAM_COUNTS: [u32; 6] = [5, 15, 35, 75, 120, 150];

const RESEARCH_FIELDS: [Slice; 6] = [
    Slice { name: "Medicine", share: 35, color: NAVY },
    Slice { name: "Biotechnology", share: 25, color: "#059669" },
    Slice { name: "Environmental Science", share: 20, color: AMBER },
    Slice { name: "Engineering", share: 10, color: "#dc2626" },
    Slice { name: "Business", share: 6, color: "#7c3aed" },
    Slice { name: "Arts & Culture", share: 4, color: "#ea580c" },
];

fn title(text: &str) -> Value {
    json!({
        "text": text,
        "left": "center",
        "textStyle": { "color": TITLE_COLOR, "fontSize": 16 }
    })
}

/// Line chart of student exchange in both directions.
pub fn student_flow_option() -> Value {
    let legend: Vec<&str> = EXCHANGE_SERIES.iter().map(|series| series.name).collect();
    let series: Vec<Value> = EXCHANGE_SERIES
        .iter()
        .map(|series| {
            json!({
                "name": series.name,
                "type": "line",
                "data": series.values,
                "smooth": true,
                "lineStyle": { "color": series.color, "width": 3 },
                "itemStyle": { "color": series.color },
                "areaStyle": { "color": series.area }
            })
        })
        .collect();

    json!({
        "title": title("Student Exchange Trends"),
        "tooltip": { "trigger": "axis", "axisPointer": { "type": "cross" } },
        "legend": { "data": legend, "bottom": 10 },
        "xAxis": { "type": "category", "data": EXCHANGE_YEARS },
        "yAxis": { "type": "value", "name": "Number of Students" },
        "series": series
    })
}

/// Bar chart of joint programs, filled with a navy to amber gradient.
pub fn program_growth_option() -> Value {
    json!({
        "title": title("Joint Program Development"),
        "tooltip": { "trigger": "axis", "axisPointer": { "type": "shadow" } },
        "xAxis": { "type": "category", "data": PROGRAM_YEARS },
        "yAxis": { "type": "value", "name": "Number of Programs" },
        "series": [{
            "name": "Joint Programs",
            "type": "bar",
            "data": PROGRAM_COUNTS,
            "itemStyle": {
                "color": {
                    "type": "linear",
                    "x": 0, "y": 0, "x2": 0, "y2": 1,
                    "colorStops": [
                        { "offset": 0, "color": NAVY },
                        { "offset": 1, "color": AMBER }
                    ]
                }
            },
            "barWidth": "60%"
        }]
    })
}

/// Doughnut of research collaboration share per field.
pub fn research_distribution_option() -> Value {
    let legend: Vec<&str> = RESEARCH_FIELDS.iter().map(|slice| slice.name).collect();
    let data: Vec<Value> = RESEARCH_FIELDS
        .iter()
        .map(|slice| {
            json!({
                "value": slice.share,
                "name": slice.name,
                "itemStyle": { "color": slice.color }
            })
        })
        .collect();

    json!({
        "title": title("Research Collaboration by Field"),
        "tooltip": { "trigger": "item", "formatter": "{a} <br/>{b}: {c} ({d}%)" },
        "legend": { "orient": "vertical", "left": "left", "data": legend },
        "series": [{
            "name": "Research Fields",
            "type": "pie",
            "radius": ["40%", "70%"],
            "center": ["60%", "50%"],
            "data": data,
            "emphasis": {
                "itemStyle": {
                    "shadowBlur": 10,
                    "shadowOffsetX": 0,
                    "shadowColor": "rgba(0, 0, 0, 0.5)"
                }
            }
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_flow_has_a_line_per_direction() {
        let option = student_flow_option();
        let series = option["series"].as_array().expect("series array");

        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|entry| entry["type"] == "line"));
        assert_eq!(series[0]["data"][5], 38_000);
        assert_eq!(option["legend"]["data"][1], "Australian Students in China");
        assert_eq!(option["xAxis"]["data"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn program_growth_uses_vertical_gradient() {
        let option = program_growth_option();
        let color = &option["series"][0]["itemStyle"]["color"];

        assert_eq!(option["series"][0]["type"], "bar");
        assert_eq!(color["type"], "linear");
        assert_eq!(color["y2"], 1);
        assert_eq!(color["colorStops"][1]["color"], AMBER);
    }

    #[test]
    fn research_shares_sum_to_one_hundred() {
        let option = research_distribution_option();
        let total: u64 = option["series"][0]["data"]
            .as_array()
            .expect("pie data")
            .iter()
            .filter_map(|slice| slice["value"].as_u64())
            .sum();

        assert_eq!(total, 100);
        assert_eq!(option["tooltip"]["trigger"], "item");
    }
}
