//! The fixed set of reports served at `/Query{N}/`

use super::{
    Col, Compare, Filter, Join, JoinKind, Kind, Limit, Measure, Output, ParamKind, ReportDef, Sort,
};

// departments
const DEPT_ID: Col = Col { table: "departments", column: "department_id" };
const DEPT_NAME: Col = Col { table: "departments", column: "department_name" };
const DEPT_PLACE: Col = Col { table: "departments", column: "place" };

// employees
const EMP_ID: Col = Col { table: "employees", column: "employee_id" };
const EMP_FIRST: Col = Col { table: "employees", column: "first_name" };
const EMP_LAST: Col = Col { table: "employees", column: "last_name" };
const EMP_EMAIL: Col = Col { table: "employees", column: "email" };
const EMP_DEPT: Col = Col { table: "employees", column: "department_id" };
const EMP_HIRED: Col = Col { table: "employees", column: "hire_date" };
const EMP_SALARY: Col = Col { table: "employees", column: "salary" };
const EMP_POSITION: Col = Col { table: "employees", column: "position" };
const EMP_MANAGER: Col = Col { table: "employees", column: "manager_id" };

// projects
const PROJ_ID: Col = Col { table: "projects", column: "project_id" };
const PROJ_NAME: Col = Col { table: "projects", column: "project_name" };
const PROJ_DEPT: Col = Col { table: "projects", column: "department_id" };
const PROJ_BUDGET: Col = Col { table: "projects", column: "budget" };

// customers
const CUST_ID: Col = Col { table: "customers", column: "customer_id" };
const CUST_NAME: Col = Col { table: "customers", column: "customer_name" };
const CUST_COUNTRY: Col = Col { table: "customers", column: "country" };
const CUST_PHONE: Col = Col { table: "customers", column: "phone_number" };
const CUST_EMAIL: Col = Col { table: "customers", column: "email" };

// suppliers
const SUPP_ID: Col = Col { table: "suppliers", column: "supplier_id" };
const SUPP_NAME: Col = Col { table: "suppliers", column: "supplier_name" };
const SUPP_COUNTRY: Col = Col { table: "suppliers", column: "country" };

// products
const PROD_ID: Col = Col { table: "products", column: "product_id" };
const PROD_NAME: Col = Col { table: "products", column: "product_name" };

// sales
const SALE_ID: Col = Col { table: "sales", column: "sale_id" };
const SALE_DATE: Col = Col { table: "sales", column: "sale_date" };
const SALE_AMOUNT: Col = Col { table: "sales", column: "amount" };
const SALE_PRODUCT: Col = Col { table: "sales", column: "product_id" };
const SALE_CUSTOMER: Col = Col { table: "sales", column: "customer_id" };
const SALE_SUPPLIER: Col = Col { table: "sales", column: "supplier_id" };
const SALE_EMPLOYEE: Col = Col { table: "sales", column: "employee_id" };
const SALE_PROJECT: Col = Col { table: "sales", column: "project_id" };

const REVENUE: Measure = Measure::Sum(SALE_AMOUNT);
const BUDGET: Measure = Measure::Field(PROJ_BUDGET);
const PROFIT: Measure = Measure::Minus(&REVENUE, &BUDGET);

const fn field(alias: &'static str, kind: Kind, col: Col) -> Output {
    Output { alias, kind, measure: Measure::Field(col) }
}

const fn computed(alias: &'static str, kind: Kind, measure: Measure) -> Output {
    Output { alias, kind, measure }
}

const fn inner(table: &'static str, left: Col, right: Col) -> Join {
    Join { kind: JoinKind::Inner, table, left, right }
}

const fn left(table: &'static str, left: Col, right: Col) -> Join {
    Join { kind: JoinKind::Left, table, left, right }
}

const fn required_eq(param: &'static str, kind: ParamKind, col: Col) -> Filter {
    Filter { param, kind, required: true, target: Measure::Field(col), compare: Compare::Eq }
}

const fn desc(alias: &'static str) -> Sort {
    Sort { alias, descending: true }
}

const fn asc(alias: &'static str) -> Sort {
    Sort { alias, descending: false }
}

pub static CATALOG: &[ReportDef] = &[
    ReportDef {
        number: 1,
        title: "Customer lookup by name",
        from: "customers",
        joins: &[],
        outputs: &[
            field("customer_id", Kind::Int, CUST_ID),
            field("customer_name", Kind::Text, CUST_NAME),
            field("country", Kind::Text, CUST_COUNTRY),
            field("phone_number", Kind::Text, CUST_PHONE),
            field("email", Kind::Text, CUST_EMAIL),
        ],
        filters: &[required_eq("name", ParamKind::Text, CUST_NAME)],
        group_by: &[],
        sort: &[asc("customer_id")],
        limit: None,
    },
    ReportDef {
        number: 2,
        title: "Employee lookup by id",
        from: "employees",
        joins: &[inner("departments", EMP_DEPT, DEPT_ID)],
        outputs: &[
            field("employee_id", Kind::Int, EMP_ID),
            field("first_name", Kind::Text, EMP_FIRST),
            field("last_name", Kind::Text, EMP_LAST),
            field("email", Kind::Text, EMP_EMAIL),
            field("position", Kind::Text, EMP_POSITION),
            field("hire_date", Kind::Date, EMP_HIRED),
            field("salary", Kind::Decimal, EMP_SALARY),
            field("manager_id", Kind::Int, EMP_MANAGER),
            field("department_name", Kind::Text, DEPT_NAME),
        ],
        filters: &[required_eq("employee_id", ParamKind::Int, EMP_ID)],
        group_by: &[],
        sort: &[],
        limit: None,
    },
    ReportDef {
        number: 3,
        title: "Sales of a customer",
        from: "sales",
        joins: &[inner("products", SALE_PRODUCT, PROD_ID)],
        outputs: &[
            field("sale_id", Kind::Int, SALE_ID),
            field("sale_date", Kind::Date, SALE_DATE),
            field("amount", Kind::Decimal, SALE_AMOUNT),
            field("product_name", Kind::Text, PROD_NAME),
        ],
        filters: &[required_eq("customer_id", ParamKind::Int, SALE_CUSTOMER)],
        group_by: &[],
        sort: &[asc("sale_date"), asc("sale_id")],
        limit: None,
    },
    ReportDef {
        number: 4,
        title: "Project revenue against budget",
        from: "projects",
        joins: &[left("sales", PROJ_ID, SALE_PROJECT)],
        outputs: &[
            field("project_id", Kind::Int, PROJ_ID),
            field("project_name", Kind::Text, PROJ_NAME),
            field("budget", Kind::Decimal, PROJ_BUDGET),
            computed("revenue", Kind::Decimal, REVENUE),
            computed("profit", Kind::Decimal, PROFIT),
        ],
        filters: &[
            Filter {
                param: "project_id",
                kind: ParamKind::Int,
                required: false,
                target: Measure::Field(PROJ_ID),
                compare: Compare::Eq,
            },
            Filter {
                param: "min_revenue",
                kind: ParamKind::Decimal,
                required: false,
                target: REVENUE,
                compare: Compare::AtLeast,
            },
            Filter {
                param: "min_profit",
                kind: ParamKind::Decimal,
                required: false,
                target: PROFIT,
                compare: Compare::AtLeast,
            },
        ],
        group_by: &[PROJ_ID, PROJ_NAME, PROJ_BUDGET],
        sort: &[desc("profit"), asc("project_id")],
        limit: None,
    },
    ReportDef {
        number: 5,
        title: "Employees of a department",
        from: "employees",
        joins: &[inner("departments", EMP_DEPT, DEPT_ID)],
        outputs: &[
            field("employee_id", Kind::Int, EMP_ID),
            field("first_name", Kind::Text, EMP_FIRST),
            field("last_name", Kind::Text, EMP_LAST),
            field("position", Kind::Text, EMP_POSITION),
            field("salary", Kind::Decimal, EMP_SALARY),
            field("department_name", Kind::Text, DEPT_NAME),
            field("place", Kind::Text, DEPT_PLACE),
        ],
        filters: &[required_eq("department_id", ParamKind::Int, DEPT_ID)],
        group_by: &[],
        sort: &[asc("employee_id")],
        limit: None,
    },
    ReportDef {
        number: 6,
        title: "Sales totals per customer",
        from: "customers",
        joins: &[inner("sales", CUST_ID, SALE_CUSTOMER)],
        outputs: &[
            field("customer_id", Kind::Int, CUST_ID),
            field("customer_name", Kind::Text, CUST_NAME),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
        ],
        filters: &[],
        group_by: &[CUST_ID, CUST_NAME],
        sort: &[desc("total_amount"), asc("customer_id")],
        limit: None,
    },
    ReportDef {
        number: 7,
        title: "Top selling products",
        from: "products",
        joins: &[inner("sales", PROD_ID, SALE_PRODUCT)],
        outputs: &[
            field("product_id", Kind::Int, PROD_ID),
            field("product_name", Kind::Text, PROD_NAME),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
        ],
        filters: &[],
        group_by: &[PROD_ID, PROD_NAME],
        sort: &[desc("sale_count"), asc("product_id")],
        limit: Some(Limit { param: "limit", default: 10, max: 100 }),
    },
    ReportDef {
        number: 8,
        title: "Sales performance per employee",
        from: "employees",
        joins: &[inner("sales", EMP_ID, SALE_EMPLOYEE)],
        outputs: &[
            field("employee_id", Kind::Int, EMP_ID),
            field("first_name", Kind::Text, EMP_FIRST),
            field("last_name", Kind::Text, EMP_LAST),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
            computed("average_amount", Kind::Decimal, Measure::Avg(SALE_AMOUNT)),
        ],
        filters: &[],
        group_by: &[EMP_ID, EMP_FIRST, EMP_LAST],
        sort: &[desc("total_amount"), asc("employee_id")],
        limit: None,
    },
    ReportDef {
        number: 9,
        title: "Revenue per supplier",
        from: "suppliers",
        joins: &[inner("sales", SUPP_ID, SALE_SUPPLIER)],
        outputs: &[
            field("supplier_id", Kind::Int, SUPP_ID),
            field("supplier_name", Kind::Text, SUPP_NAME),
            field("country", Kind::Text, SUPP_COUNTRY),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
        ],
        filters: &[],
        group_by: &[SUPP_ID, SUPP_NAME, SUPP_COUNTRY],
        sort: &[desc("total_amount"), asc("supplier_id")],
        limit: None,
    },
    ReportDef {
        number: 10,
        title: "Revenue per department",
        from: "departments",
        joins: &[
            inner("employees", DEPT_ID, EMP_DEPT),
            inner("sales", EMP_ID, SALE_EMPLOYEE),
        ],
        outputs: &[
            field("department_id", Kind::Int, DEPT_ID),
            field("department_name", Kind::Text, DEPT_NAME),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
        ],
        filters: &[],
        group_by: &[DEPT_ID, DEPT_NAME],
        sort: &[desc("total_amount"), asc("department_id")],
        limit: None,
    },
    ReportDef {
        number: 11,
        title: "Revenue per customer country",
        from: "customers",
        joins: &[inner("sales", CUST_ID, SALE_CUSTOMER)],
        outputs: &[
            field("country", Kind::Text, CUST_COUNTRY),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("total_amount", Kind::Decimal, REVENUE),
        ],
        filters: &[],
        group_by: &[CUST_COUNTRY],
        sort: &[desc("total_amount"), asc("country")],
        limit: None,
    },
    ReportDef {
        number: 12,
        title: "Sales within a date range",
        from: "sales",
        joins: &[],
        outputs: &[
            field("sale_id", Kind::Int, SALE_ID),
            field("sale_date", Kind::Date, SALE_DATE),
            field("amount", Kind::Decimal, SALE_AMOUNT),
            field("product_id", Kind::Int, SALE_PRODUCT),
            field("customer_id", Kind::Int, SALE_CUSTOMER),
            field("employee_id", Kind::Int, SALE_EMPLOYEE),
        ],
        filters: &[
            Filter {
                param: "start_date",
                kind: ParamKind::Date,
                required: true,
                target: Measure::Field(SALE_DATE),
                compare: Compare::AtLeast,
            },
            Filter {
                param: "end_date",
                kind: ParamKind::Date,
                required: true,
                target: Measure::Field(SALE_DATE),
                compare: Compare::AtMost,
            },
        ],
        group_by: &[],
        sort: &[asc("sale_date"), asc("sale_id")],
        limit: None,
    },
    ReportDef {
        number: 13,
        title: "Purchase history of a customer",
        from: "sales",
        joins: &[
            inner("customers", SALE_CUSTOMER, CUST_ID),
            inner("products", SALE_PRODUCT, PROD_ID),
            inner("suppliers", SALE_SUPPLIER, SUPP_ID),
            inner("employees", SALE_EMPLOYEE, EMP_ID),
        ],
        outputs: &[
            field("sale_id", Kind::Int, SALE_ID),
            field("sale_date", Kind::Date, SALE_DATE),
            field("customer_name", Kind::Text, CUST_NAME),
            field("product_name", Kind::Text, PROD_NAME),
            field("supplier_name", Kind::Text, SUPP_NAME),
            field("seller_first_name", Kind::Text, EMP_FIRST),
            field("seller_last_name", Kind::Text, EMP_LAST),
            field("amount", Kind::Decimal, SALE_AMOUNT),
        ],
        filters: &[required_eq("customer_id", ParamKind::Int, CUST_ID)],
        group_by: &[],
        sort: &[desc("sale_date"), desc("sale_id")],
        limit: None,
    },
    ReportDef {
        number: 14,
        title: "Salary range per department",
        from: "departments",
        joins: &[inner("employees", DEPT_ID, EMP_DEPT)],
        outputs: &[
            field("department_id", Kind::Int, DEPT_ID),
            field("department_name", Kind::Text, DEPT_NAME),
            computed("employee_count", Kind::Int, Measure::Count(EMP_ID)),
            computed("min_salary", Kind::Decimal, Measure::Min(EMP_SALARY)),
            computed("max_salary", Kind::Decimal, Measure::Max(EMP_SALARY)),
            computed("average_salary", Kind::Decimal, Measure::Avg(EMP_SALARY)),
        ],
        filters: &[],
        group_by: &[DEPT_ID, DEPT_NAME],
        sort: &[asc("department_id")],
        limit: None,
    },
    ReportDef {
        number: 15,
        title: "Sale amount range per product",
        from: "products",
        joins: &[inner("sales", PROD_ID, SALE_PRODUCT)],
        outputs: &[
            field("product_id", Kind::Int, PROD_ID),
            field("product_name", Kind::Text, PROD_NAME),
            computed("sale_count", Kind::Int, Measure::Count(SALE_ID)),
            computed("min_amount", Kind::Decimal, Measure::Min(SALE_AMOUNT)),
            computed("max_amount", Kind::Decimal, Measure::Max(SALE_AMOUNT)),
            computed("average_amount", Kind::Decimal, Measure::Avg(SALE_AMOUNT)),
        ],
        filters: &[],
        group_by: &[PROD_ID, PROD_NAME],
        sort: &[asc("product_id")],
        limit: None,
    },
    ReportDef {
        number: 16,
        title: "Project budget range per department",
        from: "departments",
        joins: &[inner("projects", DEPT_ID, PROJ_DEPT)],
        outputs: &[
            field("department_id", Kind::Int, DEPT_ID),
            field("department_name", Kind::Text, DEPT_NAME),
            computed("project_count", Kind::Int, Measure::Count(PROJ_ID)),
            computed("min_budget", Kind::Decimal, Measure::Min(PROJ_BUDGET)),
            computed("max_budget", Kind::Decimal, Measure::Max(PROJ_BUDGET)),
            computed("average_budget", Kind::Decimal, Measure::Avg(PROJ_BUDGET)),
        ],
        filters: &[],
        group_by: &[DEPT_ID, DEPT_NAME],
        sort: &[asc("department_id")],
        limit: None,
    },
];
