use shringar::money::format_rupees;

use crate::entity::{order, order_item};

fn item_rows(items: &[order_item::Model]) -> String {
    items
        .iter()
        .map(|item| {
            let variant = match (&item.size, &item.color) {
                (Some(size), Some(color)) => format!(" ({}, {})", size, color),
                (Some(size), None) => format!(" ({})", size),
                (None, Some(color)) => format!(" ({})", color),
                (None, None) => String::new(),
            };
            format!(
                r#"<tr>
    <td style="padding: 8px 0; color: #44403c; font-size: 14px;">{name}{variant} &times; {quantity}</td>
    <td style="padding: 8px 0; color: #44403c; font-size: 14px; text-align: right;">{amount}</td>
</tr>"#,
                name = item.name,
                variant = variant,
                quantity = item.quantity,
                amount = format_rupees(item.price * i64::from(item.quantity)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn totals_block(order: &order::Model) -> String {
    let shipping = if order.shipping == 0 {
        "Free".to_string()
    } else {
        format_rupees(order.shipping)
    };
    format!(
        r#"<tr><td style="padding: 4px 0; color: #78716c; font-size: 14px;">Subtotal</td><td style="padding: 4px 0; text-align: right; color: #44403c; font-size: 14px;">{subtotal}</td></tr>
<tr><td style="padding: 4px 0; color: #78716c; font-size: 14px;">Shipping</td><td style="padding: 4px 0; text-align: right; color: #44403c; font-size: 14px;">{shipping}</td></tr>
<tr><td style="padding: 4px 0; color: #78716c; font-size: 14px;">Tax</td><td style="padding: 4px 0; text-align: right; color: #44403c; font-size: 14px;">{tax}</td></tr>
<tr><td style="padding: 8px 0; color: #1c1917; font-size: 16px; font-weight: 700;">Total</td><td style="padding: 8px 0; text-align: right; color: #1c1917; font-size: 16px; font-weight: 700;">{total}</td></tr>"#,
        subtotal = format_rupees(order.subtotal),
        shipping = shipping,
        tax = format_rupees(order.tax),
        total = format_rupees(order.total),
    )
}

/// Customer-facing order confirmation. Returns (subject, html).
pub fn order_confirmation(
    store_name: &str,
    store_url: Option<&str>,
    order: &order::Model,
    items: &[order_item::Model],
) -> (String, String) {
    let subject = format!("Order confirmed - {}", order.order_number);

    let track_link = store_url
        .map(|url| {
            format!(
                r#"<div style="text-align: center; margin: 32px 0 8px;">
    <a href="{url}/orders/{number}" style="display: inline-block; background: linear-gradient(135deg, #f59e0b 0%, #d97706 100%); color: white; text-decoration: none; font-size: 15px; font-weight: 600; padding: 14px 28px; border-radius: 10px;">Track Your Order</a>
</div>"#,
                url = url.trim_end_matches('/'),
                number = order.order_number,
            )
        })
        .unwrap_or_default();

    let html = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Order Confirmed</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background-color: #fafaf9; color: #1c1917;">
    <table role="presentation" style="width: 100%; border-collapse: collapse;">
        <tr>
            <td style="padding: 40px 20px;">
                <table role="presentation" style="max-width: 560px; margin: 0 auto; background: #ffffff; border-radius: 14px; overflow: hidden; border: 1px solid #e7e5e4;">
                    <tr>
                        <td style="padding: 32px 36px 20px; text-align: center; border-bottom: 1px solid #e7e5e4;">
                            <span style="font-size: 22px; font-weight: 700; color: #b45309;">{store_name}</span>
                            <h1 style="margin: 16px 0 0; font-size: 24px; font-weight: 700; color: #1c1917;">Thank you, {customer}!</h1>
                            <p style="margin: 8px 0 0; font-size: 14px; color: #78716c;">Your order <strong style="color: #b45309;">{number}</strong> has been received.</p>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 28px 36px;">
                            <table role="presentation" style="width: 100%; border-collapse: collapse;">
                                {rows}
                                <tr><td colspan="2" style="border-top: 1px solid #e7e5e4; padding: 0;"></td></tr>
                                {totals}
                            </table>
                            {track_link}
                            <p style="margin: 24px 0 0; font-size: 13px; color: #78716c; line-height: 1.6;">
                                Shipping to: {ship_name}, {ship_address}, {ship_city}, {ship_state} - {ship_pincode}
                            </p>
                        </td>
                    </tr>
                </table>
                <p style="max-width: 560px; margin: 16px auto 0; text-align: center; font-size: 12px; color: #a8a29e;">
                    Jai Shri Krishna! We will email you again once your order ships.
                </p>
            </td>
        </tr>
    </table>
</body>
</html>"##,
        store_name = store_name,
        customer = order.shipping_name,
        number = order.order_number,
        rows = item_rows(items),
        totals = totals_block(order),
        track_link = track_link,
        ship_name = order.shipping_name,
        ship_address = order.shipping_address,
        ship_city = order.shipping_city,
        ship_state = order.shipping_state,
        ship_pincode = order.shipping_pincode,
    );

    (subject, html)
}

/// Internal notification for the store owner. Returns (subject, html).
pub fn admin_order_notification(
    store_name: &str,
    customer_email: &str,
    order: &order::Model,
    items: &[order_item::Model],
) -> (String, String) {
    let subject = format!(
        "New order {} - {}",
        order.order_number,
        format_rupees(order.total)
    );

    let html = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>New Order</title></head>
<body style="margin: 0; padding: 24px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; background-color: #fafaf9; color: #1c1917;">
    <table role="presentation" style="max-width: 560px; margin: 0 auto; background: #ffffff; border-radius: 14px; border: 1px solid #e7e5e4; border-collapse: collapse; width: 100%;">
        <tr>
            <td style="padding: 24px 32px;">
                <h1 style="margin: 0 0 4px; font-size: 20px; font-weight: 700;">{store_name}: new order {number}</h1>
                <p style="margin: 0 0 16px; font-size: 14px; color: #78716c;">Payment: {payment_status}</p>
                <table role="presentation" style="width: 100%; border-collapse: collapse;">
                    {rows}
                    <tr><td colspan="2" style="border-top: 1px solid #e7e5e4; padding: 0;"></td></tr>
                    {totals}
                </table>
                <p style="margin: 20px 0 0; font-size: 13px; color: #44403c; line-height: 1.6;">
                    <strong>{ship_name}</strong> &lt;{email}&gt;<br>
                    {phone}<br>
                    {ship_address}, {ship_city}, {ship_state} - {ship_pincode}
                </p>
            </td>
        </tr>
    </table>
</body>
</html>"##,
        store_name = store_name,
        number = order.order_number,
        payment_status = format!("{:?}", order.payment_status).to_uppercase(),
        rows = item_rows(items),
        totals = totals_block(order),
        ship_name = order.shipping_name,
        email = customer_email,
        phone = order.shipping_phone,
        ship_address = order.shipping_address,
        ship_city = order.shipping_city,
        ship_state = order.shipping_state,
        ship_pincode = order.shipping_pincode,
    );

    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};

    fn sample_order() -> order::Model {
        order::Model {
            id: "o1".into(),
            order_number: "ORD-1722950000000-4821".into(),
            user_id: "u1".into(),
            subtotal: 1498,
            shipping: 0,
            tax: 0,
            total: 1498,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Paid,
            gateway_order_id: None,
            gateway_payment_id: None,
            gateway_signature: None,
            shipping_name: "Radha Sharma".into(),
            shipping_phone: "9876543210".into(),
            shipping_address: "12 Gopal Lane".into(),
            shipping_city: "Vrindavan".into(),
            shipping_state: "UP".into(),
            shipping_pincode: "281121".into(),
            tracking_number: None,
            notes: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    fn sample_items() -> Vec<order_item::Model> {
        vec![order_item::Model {
            id: "i1".into(),
            order_id: "o1".into(),
            product_id: "p1".into(),
            name: "Peacock Mukut".into(),
            price: 749,
            quantity: 2,
            size: Some("M".into()),
            color: Some("Gold".into()),
            image: None,
        }]
    }

    #[test]
    fn confirmation_carries_order_number_and_totals() {
        let order = sample_order();
        let (subject, html) = order_confirmation(
            "Shringar",
            Some("https://shringarstore.in/"),
            &order,
            &sample_items(),
        );
        assert!(subject.contains("ORD-1722950000000-4821"));
        assert!(html.contains("Peacock Mukut (M, Gold) &times; 2"));
        assert!(html.contains("₹1,498"));
        assert!(html.contains("https://shringarstore.in/orders/ORD-1722950000000-4821"));
        assert!(html.contains(">Free<"));
    }

    #[test]
    fn admin_notification_carries_contact_details() {
        let order = sample_order();
        let (subject, html) =
            admin_order_notification("Shringar", "radha@example.com", &order, &sample_items());
        assert!(subject.contains("₹1,498"));
        assert!(html.contains("radha@example.com"));
        assert!(html.contains("9876543210"));
        assert!(html.contains("PAID"));
    }
}
